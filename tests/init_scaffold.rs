//! End-to-end scaffolding with a stubbed Gradle distribution.
//!
//! Run with: cargo test --test init_scaffold -- --nocapture

use std::cell::Cell;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use anyhow::Result;
use kirok::commands::init;
use kirok::config::Settings;
use kirok::distribution::Download;
use kirok::paths;
use kirok::prompt::{AnswerFile, AnswerSource, InitRequest};
use kirok::template;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Fixed answers; counts acknowledgements.
struct Scripted {
    request: InitRequest,
    acknowledged: usize,
}

impl Scripted {
    fn new(name: &str, project: &str, wasm: &str, binding: &str) -> Self {
        Self {
            request: InitRequest {
                project_name: name.to_string(),
                target_project_dir: project.to_string(),
                target_wasm_dir: wasm.to_string(),
                target_binding_dir: binding.to_string(),
            },
            acknowledged: 0,
        }
    }
}

impl AnswerSource for Scripted {
    fn collect(&mut self) -> Result<InitRequest> {
        Ok(self.request.clone())
    }

    fn acknowledge(&mut self) -> Result<()> {
        self.acknowledged += 1;
        Ok(())
    }
}

/// Serves a zip holding a fake `gradle` that mimics `gradle init`.
struct FakeGradle {
    body: Vec<u8>,
    calls: Cell<usize>,
}

impl FakeGradle {
    fn new(settings: &Settings, script: &str) -> Self {
        let dist = &settings.distribution;
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            let dir = SimpleFileOptions::default().unix_permissions(0o755);
            writer
                .add_directory(format!("{}/", dist.dir_name), dir)
                .unwrap();
            writer
                .add_directory(format!("{}/bin/", dist.dir_name), dir)
                .unwrap();
            writer
                .start_file(format!("{}/bin/{}", dist.dir_name, dist.executable), dir)
                .unwrap();
            writer.write_all(script.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        Self {
            body: cursor.into_inner(),
            calls: Cell::new(0),
        }
    }

    /// Writes `settings.gradle.kts` like a real `gradle init`.
    fn working(settings: &Settings) -> Self {
        Self::new(
            settings,
            "#!/bin/sh\nprintf 'rootProject.name = \"%s\"\\n' \"$7\" > settings.gradle.kts\n",
        )
    }
}

impl Download for FakeGradle {
    fn download(&self, _url: &str, out: &mut dyn Write) -> Result<u64> {
        self.calls.set(self.calls.get() + 1);
        out.write_all(&self.body)?;
        Ok(self.body.len() as u64)
    }
}

struct Workspace {
    root: TempDir,
    settings: Settings,
}

impl Workspace {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let settings = Settings {
            cache_dir: root.path().join("cache"),
            ..Settings::default()
        };
        Self { root, settings }
    }

    fn cwd(&self) -> &Path {
        self.root.path()
    }

    fn project(&self) -> std::path::PathBuf {
        self.cwd().join("p")
    }
}

#[test]
fn test_end_to_end_scaffold() {
    let ws = Workspace::new();
    let gradle = FakeGradle::working(&ws.settings);
    let mut answers = Scripted::new("demo", "p", "w", "b");

    let summary = init::run("1.4.2", &mut answers, &ws.settings, &gradle, ws.cwd()).unwrap();

    assert_eq!(answers.acknowledged, 1);
    assert_eq!(gradle.calls.get(), 1);
    for dir in ["p", "w", "b"] {
        assert!(ws.cwd().join(dir).is_dir(), "{dir}/ should exist");
    }

    let build = fs::read_to_string(paths::project::build_script(&ws.project())).unwrap();
    assert!(build.contains(r#"version "1.4.2""#));
    assert!(build.contains(r#"wasmDir = "../w""#));
    assert!(build.contains(r#"bindingDir = "../b""#));

    let sample = fs::read_to_string(paths::project::sample_source(&ws.project())).unwrap();
    assert!(!sample.is_empty());
    assert_eq!(sample, template::SAMPLE_SOURCE);

    assert_eq!(summary.targets.project_dir, ws.project());
    assert!(summary.executable.is_absolute());

    #[cfg(unix)]
    {
        assert!(summary.bootstrap.is_success());
        let settings =
            fs::read_to_string(paths::project::settings_script(&ws.project())).unwrap();
        assert!(settings.starts_with("rootProject.name = \"demo\""));
        assert!(settings.contains("gradlePluginPortal()"));
        assert!(summary.templates.all_written());
    }
}

#[test]
fn test_rerun_reuses_cached_distribution() {
    let ws = Workspace::new();
    let gradle = FakeGradle::working(&ws.settings);

    let first = init::run(
        "1.1.0",
        &mut Scripted::new("demo", "p", "w", "b"),
        &ws.settings,
        &gradle,
        ws.cwd(),
    )
    .unwrap();
    let sample_before = fs::read(paths::project::sample_source(&ws.project())).unwrap();

    let second = init::run(
        "2.0.0",
        &mut Scripted::new("demo", "p", "w", "b"),
        &ws.settings,
        &gradle,
        ws.cwd(),
    )
    .unwrap();
    let sample_after = fs::read(paths::project::sample_source(&ws.project())).unwrap();

    assert_eq!(gradle.calls.get(), 1, "second run must not download again");
    assert_eq!(first.executable, second.executable);
    assert_eq!(sample_before, sample_after);

    let build = fs::read_to_string(paths::project::build_script(&ws.project())).unwrap();
    assert_eq!(build, template::render_build_script("2.0.0", "../w", "../b"));
}

#[test]
fn test_failed_bootstrap_still_writes_templates() {
    let ws = Workspace::new();
    let gradle = FakeGradle::new(&ws.settings, "#!/bin/sh\necho 'no JDK found' >&2\nexit 1\n");

    let summary = init::run(
        "1.1.0",
        &mut Scripted::new("demo", "p", "w", "b"),
        &ws.settings,
        &gradle,
        ws.cwd(),
    )
    .unwrap();

    assert!(!summary.bootstrap.is_success());
    assert!(!summary.templates.settings_appended);
    assert!(paths::project::build_script(&ws.project()).is_file());
    assert!(paths::project::sample_source(&ws.project()).is_file());
}

#[test]
fn test_answers_file_drives_nested_layout() {
    let ws = Workspace::new();
    let gradle = FakeGradle::working(&ws.settings);
    let answers_path = ws.cwd().join("answers.toml");
    fs::write(
        &answers_path,
        r#"
project_name = "demo"
project_dir = "apps/demo"
wasm_dir = "out/wasm"
binding_dir = "out/binding"
"#,
    )
    .unwrap();

    let summary = init::run(
        "1.1.0",
        &mut AnswerFile::new(&answers_path),
        &ws.settings,
        &gradle,
        ws.cwd(),
    )
    .unwrap();

    let build = fs::read_to_string(paths::project::build_script(&summary.targets.project_dir))
        .unwrap();
    assert!(build.contains(r#"wasmDir = "../../out/wasm""#));
    assert!(build.contains(r#"bindingDir = "../../out/binding""#));
    assert!(!build.contains('\\'));
}

#[test]
fn test_uncreatable_directory_is_fatal() {
    let ws = Workspace::new();
    let gradle = FakeGradle::working(&ws.settings);
    fs::write(ws.cwd().join("blocker"), "file in the way").unwrap();

    let result = init::run(
        "1.1.0",
        &mut Scripted::new("demo", "blocker/p", "w", "b"),
        &ws.settings,
        &gradle,
        ws.cwd(),
    );

    assert!(result.is_err());
    assert_eq!(gradle.calls.get(), 0, "nothing is fetched after a fatal step");
}
