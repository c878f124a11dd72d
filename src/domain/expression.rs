//! Builders for the gcloud attribute-mapping and attribute-condition expressions.

use std::fmt;

/// OIDC issuer for GitHub Actions tokens.
pub const GITHUB_ISSUER_URI: &str = "https://token.actions.githubusercontent.com";

const WORKFLOW_FROM_REF: &str =
    "assertion.workflow_ref.split('.github/workflows/')[1].split('.')[0].split('@')[0]";

/// An ordered list of clauses joined by a fixed operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    separator: &'static str,
    clauses: Vec<String>,
}

impl Expression {
    /// Clauses joined with `&&`.
    pub fn all_of() -> Self {
        Self { separator: " && ", clauses: Vec::new() }
    }

    /// Clauses joined with `,`.
    pub fn list() -> Self {
        Self { separator: ",", clauses: Vec::new() }
    }

    pub fn push(&mut self, clause: impl Into<String>) -> &mut Self {
        self.clauses.push(clause.into());
        self
    }

    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clauses.join(self.separator))
    }
}

/// `projects/<number>/locations/global/workloadIdentityPools/<pool>`
pub fn pool_path(project_number: &str, pool: &str) -> String {
    format!("projects/{}/locations/global/workloadIdentityPools/{}", project_number, pool)
}

/// `projects/<number>/locations/global/workloadIdentityPools/<pool>/providers/<provider>`
pub fn provider_path(project_number: &str, pool: &str, provider: &str) -> String {
    format!("{}/providers/{}", pool_path(project_number, pool), provider)
}

/// Member string granting access to every identity whose `attribute` equals `value`.
pub fn principal_set(project_number: &str, pool: &str, attribute: &str, value: &str) -> String {
    format!(
        "principalSet://iam.googleapis.com/{}/attribute.{}/{}",
        pool_path(project_number, pool),
        attribute,
        value
    )
}

/// The fixed mapping from GitHub token claims to provider attributes.
pub fn attribute_mapping(project_number: &str, pool: &str, provider: &str) -> Expression {
    let audience = format!(
        "'https://iam.googleapis.com/{}'",
        provider_path(project_number, pool, provider)
    );
    let mut mapping = Expression::list();
    mapping
        .push("google.subject=assertion.sub")
        .push(format!("attribute.aud={}", audience))
        .push("attribute.actor=assertion.actor")
        .push("attribute.repository=assertion.repository")
        .push("attribute.environment=assertion.environment")
        .push(format!("attribute.workflow={}", WORKFLOW_FROM_REF))
        .push("attribute.ref=assertion.ref");
    mapping
}

/// A single `assertion.<claim>=='<value>'` equality clause.
pub fn claim_equals(claim: &str, value: &str) -> String {
    format!("assertion.{}=='{}'", claim, value)
}

pub fn repository_owner_clause(owner: &str) -> String {
    claim_equals("repository_owner", owner)
}

pub fn repository_clause(full_name: &str) -> String {
    claim_equals("repository", full_name)
}

pub fn workflow_clause(workflow: &str) -> String {
    claim_equals("workflow", workflow)
}

pub fn environment_clause(environment: &str) -> String {
    claim_equals("environment", environment)
}

pub fn branch_clause(branch: &str) -> String {
    claim_equals("ref", &format!("refs/heads/{}", branch))
}
