//! Defaults file loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, WifDefaults};

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULTS_FILE_NAME: &str = "gcp-wif.toml";

/// Parse defaults from TOML content.
pub fn parse_defaults(content: &str, path: &Path) -> Result<WifDefaults, AppError> {
    toml::from_str(content)
        .map_err(|e| AppError::Config { path: path.to_path_buf(), details: e.to_string() })
}

/// Load defaults from `explicit`, or from `gcp-wif.toml` in `cwd` if it exists.
///
/// An explicit path that does not exist is an error; a missing implicit file
/// yields empty defaults.
pub fn load_defaults(explicit: Option<&Path>, cwd: &Path) -> Result<WifDefaults, AppError> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = cwd.join(DEFAULTS_FILE_NAME);
            if !candidate.is_file() {
                return Ok(WifDefaults::default());
            }
            candidate
        }
    };

    let content = fs::read_to_string(&path)
        .map_err(|e| AppError::Config { path: path.clone(), details: e.to_string() })?;
    tracing::debug!(path = %path.display(), "loaded defaults file");
    parse_defaults(&content, &path)
}
