//! Initialize a new kirok project
//!
//! This module follows the dependable-rust pattern:
//! - Public interface (this file): argument parsing and a clean API
//! - Internal implementation: the scaffolding workflow in internal/
//!
//! # Example
//!
//! ```no_run
//! use kirok::commands::init;
//! use kirok::config::Settings;
//! use kirok::distribution::HttpDownloader;
//! use kirok::prompt::AnswerFile;
//!
//! let settings = Settings::from_env();
//! let cwd = std::env::current_dir()?;
//! let summary = init::run(
//!     "1.1.0",
//!     &mut AnswerFile::new("answers.toml"),
//!     &settings,
//!     &HttpDownloader::new(),
//!     &cwd,
//! )?;
//! println!("scaffolded {}", summary.targets.project_dir.display());
//! # Ok::<(), anyhow::Error>(())
//! ```

mod internal;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::bootstrap::BootstrapOutcome;
use crate::config::Settings;
use crate::distribution::{Download, HttpDownloader};
use crate::prompt::{AnswerFile, AnswerSource, ResolvedTargets, StdinPrompt};
use crate::template::TemplateReport;

/// Arguments accepted after `kirok init`.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(name = "init", about = "Initializes a new kirok project.")]
pub struct InitArgs {
    /// kirok Gradle plugin version
    pub version: Option<String>,

    /// Read answers from a TOML file instead of prompting
    #[arg(long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Surplus positionals after the version; ignored
    #[arg(hide = true)]
    pub rest: Vec<String>,
}

impl InitArgs {
    /// Parse the arguments that followed the command name.
    pub fn parse_args(args: &[String]) -> Result<Self, clap::Error> {
        Self::try_parse_from(std::iter::once("init").chain(args.iter().map(String::as_str)))
    }
}

/// What a completed init produced.
#[derive(Debug, Clone)]
pub struct InitSummary {
    pub version: String,
    pub targets: ResolvedTargets,
    pub executable: PathBuf,
    pub bootstrap: BootstrapOutcome,
    pub templates: TemplateReport,
}

/// CLI handler for `kirok init [version] [--answers FILE]`.
pub fn execute(args: &[String], settings: &Settings) -> Result<()> {
    let args = match InitArgs::parse_args(args) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(e) => return Err(e).context("Invalid arguments for init"),
    };

    let version = args
        .version
        .unwrap_or_else(|| settings.default_plugin_version.clone());
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let downloader = HttpDownloader::new();

    let mut answers: Box<dyn AnswerSource> = match args.answers {
        Some(path) => Box::new(AnswerFile::new(path)),
        None => Box::new(StdinPrompt::stdio()),
    };
    run(&version, answers.as_mut(), settings, &downloader, &cwd)?;
    Ok(())
}

/// Run the full init workflow with explicit collaborators.
///
/// # Process
///
/// 1. **Answers**: project name and three target directories from `answers`
/// 2. **Confirmation**: resolved paths echoed, `answers` acknowledges
/// 3. **Directories**: project, wasm, and binding dirs created
/// 4. **Distribution**: Gradle fetched into the cache (once) via `downloader`
/// 5. **Bootstrap**: `gradle init` in the project dir (failure only warns)
/// 6. **Templates**: kirok settings, build script, and sample written
///
/// # Errors
///
/// Returns an error if:
/// - The answers cannot be loaded (answers file only)
/// - Any directory cannot be created
/// - The distribution cannot be downloaded or extracted
pub fn run(
    version: &str,
    answers: &mut dyn AnswerSource,
    settings: &Settings,
    downloader: &dyn Download,
    cwd: &Path,
) -> Result<InitSummary> {
    internal::execute_init(version, answers, settings, downloader, cwd)
}
