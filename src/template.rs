//! kirok files written into the bootstrapped Gradle project.
//!
//! Only the source directory creation is fatal. The three file writes are
//! independent: a failure is logged and the next write still runs.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::paths;
use crate::prompt::ResolvedTargets;

/// Block appended to `settings.gradle.kts`.
pub const SETTINGS_PLUGIN_MANAGEMENT: &str = r#"
pluginManagement {
    repositories {
        mavenCentral()
        mavenLocal()
        gradlePluginPortal()
    }
}
"#;

/// `src/commonMain/kotlin/Sample.kt`, written verbatim.
pub const SAMPLE_SOURCE: &str = r#"
import io.github.devngho.kirok.Init
import io.github.devngho.kirok.Intent
import io.github.devngho.kirok.Model
import kotlinx.serialization.Serializable

@Serializable
@Model
data class Sample(var count: Int)

@Init
fun init(): Sample = Sample(0)

@Intent
fun increment(counter: Sample) {
    counter.count++
}
"#;

/// Render `build.gradle.kts`.
///
/// `wasm_dir` and `binding_dir` are project-relative, `/`-separated.
pub fn render_build_script(plugin_version: &str, wasm_dir: &str, binding_dir: &str) -> String {
    format!(
        r#"
import io.github.devngho.kirok.plugin.kirok
import org.jetbrains.kotlin.gradle.targets.js.binaryen.BinaryenRootPlugin

plugins {{
    kotlin("multiplatform") version "1.9.0"
    kotlin("plugin.serialization") version "1.9.0"
    id("com.google.devtools.ksp") version "1.9.0-1.0.13"
    id("io.github.devngho.kirok.plugin") version "{plugin_version}"
}}

group = "com.example"
version = "1.0-SNAPSHOT"

repositories {{
    mavenCentral()
    mavenLocal()
}}

kotlin {{
    jvm()
    wasm {{
        binaries.executable()
        browser {{
            webpackTask {{
                enabled = false
            }}
        }}
        applyBinaryen()
    }}
    sourceSets {{
        val jvmMain by getting {{
            dependencies {{
                // Add your bindings, dependencies here
            }}
        }}
    }}
}}

kirok {{
    wasmDir = "{wasm_dir}"
    wasmJsDir = "{binding_dir}"
    bindingDir = "{binding_dir}"
    // Add your bindings here
    binding = listOf()
}}

dependencies.kirok(project)
"#
    )
}

/// Path of `target` relative to `project_dir`, `/`-separated on every host.
///
/// Falls back to the absolute path when no relative form exists.
pub fn project_relative(project_dir: &Path, target: &Path) -> String {
    paths::relative_slash(project_dir, target).unwrap_or_else(|| {
        tracing::warn!(?project_dir, ?target, "no relative path, using absolute");
        paths::to_slash(target)
    })
}

/// Which of the swallowed writes went through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateReport {
    pub settings_appended: bool,
    pub build_script_written: bool,
    pub sample_written: bool,
}

impl TemplateReport {
    pub fn all_written(&self) -> bool {
        self.settings_appended && self.build_script_written && self.sample_written
    }
}

/// Write the kirok configuration and sample into `targets.project_dir`.
pub fn write_all(targets: &ResolvedTargets, plugin_version: &str) -> Result<TemplateReport> {
    let project = &targets.project_dir;
    let mut report = TemplateReport::default();

    // 1. settings.gradle.kts (append; expected from gradle init)
    let settings = paths::project::settings_script(project);
    report.settings_appended = swallow(
        "settings script",
        &settings,
        append(&settings, SETTINGS_PLUGIN_MANAGEMENT),
    );

    // 2. build.gradle.kts
    let build = paths::project::build_script(project);
    let script = render_build_script(
        plugin_version,
        &project_relative(project, &targets.wasm_dir),
        &project_relative(project, &targets.binding_dir),
    );
    report.build_script_written = swallow("build script", &build, overwrite(&build, &script));

    // 3. src/commonMain/kotlin
    let source_dir = paths::project::source_dir(project);
    fs::create_dir_all(&source_dir)
        .with_context(|| format!("Failed to create {:?}", source_dir))?;

    // 4. Sample.kt
    let sample = paths::project::sample_source(project);
    report.sample_written = swallow("sample source", &sample, overwrite(&sample, SAMPLE_SOURCE));

    Ok(report)
}

fn append(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(content.as_bytes())
}

fn overwrite(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(content.as_bytes())
}

fn swallow(what: &str, path: &Path, result: std::io::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, ?path, "failed to write {what}, skipping");
            false
        }
    }
}
