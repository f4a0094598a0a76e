//! Runs `gradle init` to generate the project skeleton.
//!
//! A failing bootstrap does not stop scaffolding: the outcome is returned
//! and logged, and the caller carries on writing templates.

use std::path::Path;
use std::process::{Command, Stdio};

/// Result of the bootstrap subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Succeeded,
    /// Exited unsuccessfully. `status` is `None` when killed by a signal.
    Failed { status: Option<i32>, stderr: String },
    /// Could not be started at all.
    SpawnFailed { error: String },
}

impl BootstrapOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BootstrapOutcome::Succeeded)
    }
}

/// Arguments for `gradle init` producing a basic project.
pub fn init_args<'a>(dsl: &'a str, project_name: &'a str) -> [&'a str; 7] {
    [
        "init",
        "--type",
        "basic",
        "--dsl",
        dsl,
        "--project-name",
        project_name,
    ]
}

/// Run `<executable> init --type basic --dsl <dsl> --project-name <name>`
/// inside `project_dir`.
pub fn run(executable: &Path, project_dir: &Path, project_name: &str, dsl: &str) -> BootstrapOutcome {
    tracing::debug!(?executable, ?project_dir, project_name, "running bootstrap");

    let output = Command::new(executable)
        .args(init_args(dsl, project_name))
        .current_dir(project_dir)
        .stdin(Stdio::null())
        .output();

    let outcome = match output {
        Ok(output) if output.status.success() => BootstrapOutcome::Succeeded,
        Ok(output) => BootstrapOutcome::Failed {
            status: output.status.code(),
            stderr: tail(&String::from_utf8_lossy(&output.stderr), 20),
        },
        Err(e) => BootstrapOutcome::SpawnFailed {
            error: e.to_string(),
        },
    };

    match &outcome {
        BootstrapOutcome::Succeeded => {}
        BootstrapOutcome::Failed { status, stderr } => {
            tracing::warn!(?status, stderr = %stderr, "gradle init failed, continuing");
        }
        BootstrapOutcome::SpawnFailed { error } => {
            tracing::warn!(error = %error, ?executable, "could not start gradle, continuing");
        }
    }

    outcome
}

/// Last `lines` lines of `text`.
fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn script(dir: &Path, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("gradle");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_init_args() {
        assert_eq!(
            init_args("kotlin", "demo"),
            ["init", "--type", "basic", "--dsl", "kotlin", "--project-name", "demo"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_in_project_dir_with_args() {
        let bin = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let exe = script(bin.path(), r#"echo "$@" > invocation.txt"#);

        let outcome = run(&exe, project.path(), "demo", "kotlin");

        assert!(outcome.is_success());
        let recorded = std::fs::read_to_string(project.path().join("invocation.txt")).unwrap();
        assert_eq!(
            recorded.trim(),
            "init --type basic --dsl kotlin --project-name demo"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_reported_not_fatal() {
        let bin = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let exe = script(bin.path(), "echo broken >&2\nexit 3");

        let outcome = run(&exe, project.path(), "demo", "kotlin");

        assert_eq!(
            outcome,
            BootstrapOutcome::Failed {
                status: Some(3),
                stderr: "broken".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_executable_is_spawn_failure() {
        let project = TempDir::new().unwrap();
        let outcome = run(
            &project.path().join("no-such-gradle"),
            project.path(),
            "demo",
            "kotlin",
        );
        assert!(matches!(outcome, BootstrapOutcome::SpawnFailed { .. }));
    }

    #[test]
    fn test_tail_keeps_last_lines() {
        assert_eq!(tail("a\nb\nc\nd", 2), "c\nd");
        assert_eq!(tail("only", 5), "only");
        assert_eq!(tail("", 3), "");
    }
}
