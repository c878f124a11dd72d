use std::io;

use thiserror::Error;

/// Failure of a single gcloud invocation.
#[derive(Debug, Error)]
pub enum GcloudError {
    /// The process could not be started.
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The process exited non-zero.
    #[error("{}", describe_failure(.status, .stderr))]
    Failed { status: Option<i32>, stderr: String },
}

fn describe_failure(status: &Option<i32>, stderr: &str) -> String {
    let code = match status {
        Some(code) => format!("gcloud exited with status {}", code),
        None => "gcloud was terminated by a signal".to_string(),
    };
    if stderr.is_empty() { code } else { format!("{}: {}", code, stderr) }
}

/// The external `gcloud` CLI.
///
/// Only the exit status and, for listings, newline-separated stdout matter.
pub trait Gcloud {
    /// Run a listing command and return its non-empty output lines.
    fn list(&self, args: &[String]) -> Result<Vec<String>, GcloudError>;

    /// Run a describe-style command. `true` when it exits 0.
    fn probe(&self, args: &[String]) -> bool;

    /// Run a mutating command. Non-zero exit is the only failure signal.
    fn mutate(&self, args: &[String]) -> Result<(), GcloudError>;
}

impl<G: Gcloud + ?Sized> Gcloud for &G {
    fn list(&self, args: &[String]) -> Result<Vec<String>, GcloudError> {
        (**self).list(args)
    }

    fn probe(&self, args: &[String]) -> bool {
        (**self).probe(args)
    }

    fn mutate(&self, args: &[String]) -> Result<(), GcloudError> {
        (**self).mutate(args)
    }
}
