//! Listing of existing cloud resources through gcloud.

use crate::domain::{AppError, trailing_segment};
use crate::ports::Gcloud;

pub const LOCATION: &str = "global";

/// Builds a gcloud argument vector from string slices.
pub fn gcloud_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

/// Queries projects, pools, providers and service accounts.
///
/// Every call goes to gcloud; nothing is cached between calls.
pub struct ResourceLister<'a, G: Gcloud> {
    gcloud: &'a G,
}

impl<'a, G: Gcloud> ResourceLister<'a, G> {
    pub fn new(gcloud: &'a G) -> Self {
        Self { gcloud }
    }

    fn list(&self, resource: &'static str, args: Vec<String>) -> Result<Vec<String>, AppError> {
        let items =
            self.gcloud.list(&args).map_err(|source| AppError::List { resource, source })?;
        tracing::debug!(resource, count = items.len(), "listed resources");
        Ok(items)
    }

    pub fn list_projects(&self) -> Result<Vec<String>, AppError> {
        self.list("projects", gcloud_args(&["projects", "list", "--format", "value(projectId)"]))
    }

    pub fn list_pools(
        &self,
        project_id: &str,
        include_deleted: bool,
    ) -> Result<Vec<String>, AppError> {
        let mut args = gcloud_args(&[
            "iam",
            "workload-identity-pools",
            "list",
            "--project",
            project_id,
            "--location",
            LOCATION,
            "--format",
            "value(name)",
        ]);
        if include_deleted {
            args.extend(deleted_filter());
        }
        Ok(short_names(self.list("workload identity pools", args)?))
    }

    pub fn list_providers(
        &self,
        project_id: &str,
        pool: &str,
        include_deleted: bool,
    ) -> Result<Vec<String>, AppError> {
        let mut args = gcloud_args(&[
            "iam",
            "workload-identity-pools",
            "providers",
            "list",
            "--project",
            project_id,
            "--location",
            LOCATION,
            "--workload-identity-pool",
            pool,
            "--format",
            "value(name)",
        ]);
        if include_deleted {
            args.extend(deleted_filter());
        }
        Ok(short_names(self.list("providers", args)?))
    }

    pub fn list_service_accounts(&self, project_id: &str) -> Result<Vec<String>, AppError> {
        self.list(
            "service accounts",
            gcloud_args(&[
                "iam",
                "service-accounts",
                "list",
                "--project",
                project_id,
                "--format",
                "value(email)",
            ]),
        )
    }

    /// Numeric project number, needed for audience and principal paths.
    pub fn project_number(&self, project_id: &str) -> Result<String, AppError> {
        let args = gcloud_args(&["projects", "describe", project_id, "--format", "value(projectNumber)"]);
        let lines = self.gcloud.list(&args).map_err(|source| AppError::ProjectNumber {
            project: project_id.to_string(),
            source,
        })?;
        lines.into_iter().next().ok_or_else(|| AppError::NoResources {
            resource: "project number",
            scope: format!(" for project {}", project_id),
        })
    }
}

fn deleted_filter() -> Vec<String> {
    gcloud_args(&["--show-deleted", "--filter", "state:DELETED"])
}

fn short_names(items: Vec<String>) -> Vec<String> {
    items.iter().map(|item| trailing_segment(item).to_string()).collect()
}
