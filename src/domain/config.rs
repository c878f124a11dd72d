//! The configuration record threaded through a single command invocation.

use serde::Deserialize;

use super::AppError;

/// Fields needed to configure workload identity federation.
///
/// `None` means "not yet resolved". Resolvers only ever fill `None` fields, so
/// a value supplied by a flag or an earlier step is never asked for again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WifConfig {
    pub project_id: Option<String>,
    pub project_number: Option<String>,
    pub pool: Option<String>,
    pub provider: Option<String>,
    pub service_account: Option<String>,
    pub github_owner: Option<String>,
    pub github_repo: Option<String>,
    /// Allow the provider to be created without a repository condition.
    pub unsafe_conditions: bool,
}

impl WifConfig {
    pub fn project_id(&self) -> Result<&str, AppError> {
        self.project_id.as_deref().ok_or(AppError::Unresolved("project"))
    }

    pub fn project_number(&self) -> Result<&str, AppError> {
        self.project_number.as_deref().ok_or(AppError::Unresolved("project number"))
    }

    pub fn pool(&self) -> Result<&str, AppError> {
        self.pool.as_deref().ok_or(AppError::Unresolved("pool"))
    }

    pub fn provider(&self) -> Result<&str, AppError> {
        self.provider.as_deref().ok_or(AppError::Unresolved("provider"))
    }

    pub fn service_account(&self) -> Result<&str, AppError> {
        self.service_account.as_deref().ok_or(AppError::Unresolved("service account"))
    }

    pub fn github_owner(&self) -> Result<&str, AppError> {
        self.github_owner.as_deref().ok_or(AppError::Unresolved("GitHub repository owner"))
    }

    /// `owner/repo`, as used in repository conditions.
    pub fn github_full_name(&self) -> Result<String, AppError> {
        let repo = self.github_repo.as_deref().ok_or(AppError::Unresolved("GitHub repository"))?;
        Ok(format!("{}/{}", self.github_owner()?, repo))
    }

    /// Fill every unset field from `defaults`. Already-set fields win.
    pub fn apply_defaults(&mut self, defaults: WifDefaults) {
        fill(&mut self.project_id, defaults.project);
        fill(&mut self.pool, defaults.pool);
        fill(&mut self.provider, defaults.provider);
        fill(&mut self.service_account, defaults.service_account);
        fill(&mut self.github_owner, defaults.github_owner);
        fill(&mut self.github_repo, defaults.github_repo);
        self.unsafe_conditions |= defaults.unsafe_conditions;
    }
}

fn fill(field: &mut Option<String>, value: Option<String>) {
    if field.is_none() {
        *field = value.filter(|v| !v.is_empty());
    }
}

/// Values read from a `gcp-wif.toml` defaults file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WifDefaults {
    pub project: Option<String>,
    pub pool: Option<String>,
    pub provider: Option<String>,
    pub service_account: Option<String>,
    pub github_owner: Option<String>,
    pub github_repo: Option<String>,
    #[serde(default, rename = "unsafe")]
    pub unsafe_conditions: bool,
}
