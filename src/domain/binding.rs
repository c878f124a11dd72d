/// Token attribute used to associate a service account with GitHub jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingAttribute {
    Workflow,
    Repository,
    Environment,
    Actor,
    Ref,
}

impl BindingAttribute {
    /// Menu order. Workflow comes first as the suggested choice.
    pub const ALL: [BindingAttribute; 5] = [
        BindingAttribute::Workflow,
        BindingAttribute::Repository,
        BindingAttribute::Environment,
        BindingAttribute::Actor,
        BindingAttribute::Ref,
    ];

    /// Name of the mapped attribute (`attribute.<name>`).
    pub fn name(&self) -> &'static str {
        match self {
            BindingAttribute::Workflow => "workflow",
            BindingAttribute::Repository => "repository",
            BindingAttribute::Environment => "environment",
            BindingAttribute::Actor => "actor",
            BindingAttribute::Ref => "ref",
        }
    }

    pub fn menu_label(&self) -> String {
        match self {
            BindingAttribute::Workflow => format!("{} [SUGGESTED]", self.name()),
            _ => self.name().to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }

    pub fn expected_format(&self) -> &'static str {
        match self {
            BindingAttribute::Workflow => "workflow-filename (without .yml)",
            BindingAttribute::Repository => "owner/repo",
            BindingAttribute::Environment => "env",
            BindingAttribute::Actor => "username",
            BindingAttribute::Ref => "refs/heads/branch-name",
        }
    }

    pub fn examples(&self) -> &'static [&'static str] {
        match self {
            BindingAttribute::Workflow => &["build", "deploy"],
            BindingAttribute::Repository => &["unacast/actions", "redis/go-redis"],
            BindingAttribute::Environment => &["dev", "prod"],
            BindingAttribute::Actor => &[],
            BindingAttribute::Ref => &["refs/heads/main", "refs/heads/feature-branch"],
        }
    }

    /// Format guidance shown before asking for the attribute value.
    pub fn guidance(&self) -> String {
        let mut text = format!("Expected format for [{}]: {}", self.name(), self.expected_format());
        if !self.examples().is_empty() {
            text.push_str("\n\nExamples:");
            for example in self.examples() {
                text.push_str(&format!("\n- {}", example));
            }
        }
        text
    }
}
