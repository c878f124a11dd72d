use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::ports::GcloudError;

/// Library-wide error type for gcp-wif operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Listing cloud resources through gcloud failed.
    #[error("failed to list {resource}: {source}")]
    List {
        resource: &'static str,
        #[source]
        source: GcloudError,
    },

    /// Looking up the numeric project number failed.
    #[error("failed to look up project number for '{project}': {source}")]
    ProjectNumber {
        project: String,
        #[source]
        source: GcloudError,
    },

    /// A listing succeeded but returned nothing where at least one entry is required.
    #[error("no {resource} found{scope}")]
    NoResources { resource: &'static str, scope: String },

    /// A supplied pool or provider name contains characters outside `[A-Za-z0-9-]`.
    #[error("Invalid {kind} name '{name}': only letters, numbers, and hyphens are allowed")]
    InvalidName { kind: &'static str, name: String },

    /// A value quoted into a condition clause is blank or contains `'` or `\`.
    #[error("Invalid {field} '{value}': must be non-empty without quotes or backslashes")]
    InvalidValue { field: &'static str, value: String },

    /// The user refused a required confirmation.
    #[error("{0}")]
    UserDeclined(String),

    /// A create/delete/restore/bind call returned non-zero.
    #[error("failed to {action}: {source}")]
    Mutation {
        action: &'static str,
        #[source]
        source: GcloudError,
    },

    /// A builder ran before the field it needs was resolved.
    #[error("{0} has not been resolved")]
    Unresolved(&'static str),

    /// Terminal interaction failed.
    #[error("Failed to read input: {0}")]
    Prompt(String),

    /// Input ended before a valid answer was given.
    #[error("Input closed before a valid answer was given")]
    InputClosed,

    /// Defaults file could not be read or parsed.
    #[error("Invalid config file {}: {details}", path.display())]
    Config { path: PathBuf, details: String },

    /// Rendering the workflow snippet failed.
    #[error("Failed to render template '{name}': {details}")]
    Template { name: &'static str, details: String },
}

impl AppError {
    /// Build a `NoResources` error scoped to a project.
    pub fn none_in_project(resource: &'static str, project: &str) -> Self {
        AppError::NoResources { resource, scope: format!(" in project {}", project) }
    }
}
