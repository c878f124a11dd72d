//! Shared testing utilities for gcp-wif CLI tests.

use assert_cmd::Command;
use std::env;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory and a fake `gcloud`.
///
/// The fake answers from files in its state directory, keyed by the leading
/// positional arguments of the call (`projects list` -> `projects_list`):
/// - `<key>.out`: printed to stdout, exit 0
/// - `<key>.fail`: printed to stderr, exit 1
/// - `<key>.exists`: exit 0 (describe probes)
///
/// Describe calls without a file exit 1. Create calls mark the matching
/// describe key as existing. Every call is appended to `calls.log`.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    bin_dir: PathBuf,
    state_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        let bin_dir = root.path().join("bin");
        let state_dir = root.path().join("gcloud-state");
        for dir in [&work_dir, &bin_dir, &state_dir] {
            fs::create_dir_all(dir).expect("Failed to create test directory");
        }

        let script = format!(
            r#"#!/bin/sh
STATE="{}"
echo "$*" >> "$STATE/calls.log"

ROUTE=""
for arg in "$@"; do
    case "$arg" in
        --*) break ;;
    esac
    ROUTE="$ROUTE $arg"
done
KEY=$(echo "$ROUTE" | sed -e 's/^ //' -e 's/ /_/g')

if [ -f "$STATE/$KEY.fail" ]; then
    cat "$STATE/$KEY.fail" >&2
    exit 1
fi
if [ -f "$STATE/$KEY.out" ]; then
    cat "$STATE/$KEY.out"
    exit 0
fi
if [ -f "$STATE/$KEY.exists" ]; then
    exit 0
fi

case "$KEY" in
    *_create-oidc_*|*_create_*)
        DESCRIBE=$(echo "$KEY" | sed -e 's/_create-oidc_/_describe_/' -e 's/_create_/_describe_/')
        touch "$STATE/$DESCRIBE.exists"
        ;;
    *_describe_*)
        echo "NOT_FOUND: $ROUTE" >&2
        exit 1
        ;;
esac
exit 0
"#,
            state_dir.display()
        );

        let script_path = bin_dir.join("gcloud");
        fs::write(&script_path, script).expect("Failed to write fake gcloud");
        let mut perms = fs::metadata(&script_path).expect("Failed to stat fake gcloud").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script_path, perms).expect("Failed to chmod fake gcloud");

        Self { root, work_dir, bin_dir, state_dir }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn gcloud_path(&self) -> PathBuf {
        self.bin_dir.join("gcloud")
    }

    /// Build a command for invoking the compiled binary with the fake gcloud on `PATH`.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("gcp-wif").expect("Failed to locate gcp-wif binary");
        let path = match env::var_os("PATH") {
            Some(existing) => format!("{}:{}", self.bin_dir.display(), existing.to_string_lossy()),
            None => self.bin_dir.display().to_string(),
        };
        cmd.current_dir(&self.work_dir)
            .env("PATH", path)
            .env_remove("GCP_WIF_GCLOUD")
            .env_remove("RUST_LOG");
        cmd
    }

    fn key(route: &str) -> String {
        route.replace(' ', "_")
    }

    /// Make `route` print `lines`.
    pub fn listing(&self, route: &str, lines: &[&str]) -> &Self {
        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(self.state_dir.join(format!("{}.out", Self::key(route))), content)
            .expect("Failed to write listing");
        self
    }

    /// Make `route` fail with `stderr`.
    pub fn fail(&self, route: &str, stderr: &str) -> &Self {
        fs::write(self.state_dir.join(format!("{}.fail", Self::key(route))), stderr)
            .expect("Failed to write failure");
        self
    }

    /// Make a describe probe for `route` succeed.
    pub fn exists(&self, route: &str) -> &Self {
        fs::write(self.state_dir.join(format!("{}.exists", Self::key(route))), "")
            .expect("Failed to write marker");
        self
    }

    /// Every gcloud invocation so far, one argument string per call.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.state_dir.join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Calls whose leading arguments start with `route`.
    pub fn calls_to(&self, route: &str) -> Vec<String> {
        self.calls().into_iter().filter(|call| call.starts_with(route)).collect()
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }
}
