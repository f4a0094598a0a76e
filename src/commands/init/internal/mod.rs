//! Internal implementation for init command

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::bootstrap;
use crate::config::Settings;
use crate::distribution::{self, Download};
use crate::prompt::{AnswerSource, ResolvedTargets};
use crate::template;

use super::InitSummary;

/// Main execution logic for init command
pub fn execute_init(
    version: &str,
    answers: &mut dyn AnswerSource,
    settings: &Settings,
    downloader: &dyn Download,
    cwd: &Path,
) -> Result<InitSummary> {
    println!("📖 kirok-cli init");
    println!("📖 Version: {version}");

    // === STEP 1: COLLECT AND CONFIRM (NOTHING TOUCHES DISK BEFORE THIS) ===
    let request = answers.collect()?;
    let targets = request.resolve(cwd);

    println!();
    display_targets(&targets);
    answers.acknowledge()?;

    // === STEP 2: DIRECTORIES ===
    step("Creating directories", || {
        for dir in [&targets.project_dir, &targets.wasm_dir, &targets.binding_dir] {
            fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
        }
        Ok(())
    })?;

    // === STEP 3: GRADLE ===
    let (executable, outcome) = step("Initializing Gradle projects", || {
        let executable = distribution::ensure(settings, downloader)?;
        let outcome = bootstrap::run(
            &executable,
            &targets.project_dir,
            &targets.project_name,
            &settings.dsl,
        );
        Ok((executable, outcome))
    })?;
    if !outcome.is_success() {
        println!("⚠️  gradle init did not succeed; continuing with kirok setup");
    }

    // === STEP 4: KIROK FILES ===
    let report = step("Initializing kirok", || template::write_all(&targets, version))?;
    if !report.all_written() {
        println!("⚠️  Some kirok files could not be written (see warnings above)");
    }

    display_next_steps();

    Ok(InitSummary {
        version: version.to_string(),
        targets,
        executable,
        bootstrap: outcome,
        templates: report,
    })
}

/// Print `📖 <label>...`, run `f`, then ` Done!` on success.
fn step<T>(label: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    print!("📖 {label}...");
    std::io::stdout().flush().ok();
    let value = f()?;
    println!(" Done!");
    Ok(value)
}

fn display_targets(targets: &ResolvedTargets) {
    println!("📖 Check your configuration:");
    println!("  {} {}", "Project name:".bold(), targets.project_name);
    println!(
        "  {} {}",
        "Target directory (for project):".bold(),
        targets.project_dir.display()
    );
    println!(
        "  {} {}",
        "Target directory (for wasm):".bold(),
        targets.wasm_dir.display()
    );
    println!(
        "  {} {}",
        "Target directory (for binding):".bold(),
        targets.binding_dir.display()
    );
    println!();
}

fn display_next_steps() {
    println!();
    println!("{}", "🎉  Successfully initialized kirok project!".green().bold());
    println!("📖  What's next:");
    println!("  Set java sdk to 19 in IDEA.");
    println!("  Then add your bindings in build.gradle.kts.");
    println!("  Auto re-build projects with gradle --continuous assemble");
}
