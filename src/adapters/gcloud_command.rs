use std::ffi::OsString;
use std::io::{self, Write};
use std::process::{Command, Output, Stdio};

use crate::ports::{Gcloud, GcloudError};

/// Environment variable overriding the gcloud binary.
pub const GCLOUD_ENV: &str = "GCP_WIF_GCLOUD";

/// Runs the real `gcloud` binary as a subprocess.
#[derive(Debug, Clone)]
pub struct GcloudCommandAdapter {
    program: OsString,
}

impl Default for GcloudCommandAdapter {
    fn default() -> Self {
        Self::new("gcloud")
    }
}

impl GcloudCommandAdapter {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self { program: program.into() }
    }

    /// Use `$GCP_WIF_GCLOUD` when set, `gcloud` from `PATH` otherwise.
    pub fn from_env() -> Self {
        match std::env::var_os(GCLOUD_ENV) {
            Some(program) if !program.is_empty() => Self::new(program),
            _ => Self::default(),
        }
    }

    fn command(&self, args: &[String]) -> Command {
        tracing::debug!(program = ?self.program, args = %args.join(" "), "running gcloud");
        let mut command = Command::new(&self.program);
        command.args(args).stdin(Stdio::null());
        command
    }

    fn output(&self, mut command: Command) -> Result<Output, GcloudError> {
        command.output().map_err(|source| GcloudError::Spawn {
            program: self.program.to_string_lossy().into_owned(),
            source,
        })
    }
}

fn failure(output: &Output) -> GcloudError {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    tracing::warn!(status = ?output.status.code(), %stderr, "gcloud failed");
    GcloudError::Failed { status: output.status.code(), stderr }
}

impl Gcloud for GcloudCommandAdapter {
    fn list(&self, args: &[String]) -> Result<Vec<String>, GcloudError> {
        let output = self.output(self.command(args))?;
        if !output.status.success() {
            return Err(failure(&output));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn probe(&self, args: &[String]) -> bool {
        let mut command = self.command(args);
        command.stdout(Stdio::null()).stderr(Stdio::null());
        match command.status() {
            Ok(status) => status.success(),
            Err(err) => {
                tracing::warn!(error = %err, "gcloud probe could not start");
                false
            }
        }
    }

    fn mutate(&self, args: &[String]) -> Result<(), GcloudError> {
        let mut command = self.command(args);
        command.stdout(Stdio::inherit());
        let output = self.output(command)?;

        // Pass gcloud's own progress and error text through to the user.
        let _ = io::stderr().write_all(&output.stderr);

        if output.status.success() { Ok(()) } else { Err(failure(&output)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn list_splits_and_trims_lines() {
        let adapter = GcloudCommandAdapter::new("printf");
        let lines = adapter.list(&args(&["a\\n\\n  b  \\n"])).unwrap();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn list_reports_non_zero_exit() {
        let adapter = GcloudCommandAdapter::new("false");
        let err = adapter.list(&[]).unwrap_err();
        assert!(matches!(err, GcloudError::Failed { status: Some(1), .. }));
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let adapter = GcloudCommandAdapter::new("gcp-wif-no-such-binary");
        assert!(matches!(adapter.list(&[]), Err(GcloudError::Spawn { .. })));
        assert!(!adapter.probe(&[]));
    }

    #[test]
    fn probe_follows_exit_status() {
        assert!(GcloudCommandAdapter::new("true").probe(&[]));
        assert!(!GcloudCommandAdapter::new("false").probe(&[]));
    }

    #[test]
    fn mutate_follows_exit_status() {
        assert!(GcloudCommandAdapter::new("true").mutate(&[]).is_ok());
        assert!(GcloudCommandAdapter::new("false").mutate(&[]).is_err());
    }
}
