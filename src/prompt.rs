//! Operator input for `kirok init`.
//!
//! Answers come from an [`AnswerSource`]: the interactive [`StdinPrompt`]
//! by default, or an [`AnswerFile`] for unattended runs.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::paths;

/// The four raw answers collected before scaffolding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InitRequest {
    pub project_name: String,
    #[serde(rename = "project_dir")]
    pub target_project_dir: String,
    #[serde(rename = "wasm_dir")]
    pub target_wasm_dir: String,
    #[serde(rename = "binding_dir")]
    pub target_binding_dir: String,
}

/// An [`InitRequest`] with every directory made absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTargets {
    pub project_name: String,
    pub project_dir: PathBuf,
    pub wasm_dir: PathBuf,
    pub binding_dir: PathBuf,
}

impl InitRequest {
    /// Resolve the directory answers against `cwd`. No other validation.
    pub fn resolve(&self, cwd: &Path) -> ResolvedTargets {
        ResolvedTargets {
            project_name: self.project_name.clone(),
            project_dir: paths::absolute(cwd, &self.target_project_dir),
            wasm_dir: paths::absolute(cwd, &self.target_wasm_dir),
            binding_dir: paths::absolute(cwd, &self.target_binding_dir),
        }
    }
}

/// Where init answers come from.
pub trait AnswerSource {
    /// Collect the four answers.
    fn collect(&mut self) -> Result<InitRequest>;

    /// Last chance to abort once the resolved paths have been shown.
    fn acknowledge(&mut self) -> Result<()>;
}

/// Interactive prompt over any reader/writer pair.
pub struct StdinPrompt<R, W> {
    input: R,
    output: W,
}

impl StdinPrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdinPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `label` and read the first whitespace-delimited token of one line.
    ///
    /// Read failures and blank lines both yield an empty answer.
    fn ask(&mut self, label: &str) -> String {
        let _ = write!(self.output, "❓  {label}: ");
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(_) => line.split_whitespace().next().unwrap_or_default().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, prompt = label, "failed to read answer, using empty value");
                String::new()
            }
        }
    }
}

impl<R: BufRead, W: Write> AnswerSource for StdinPrompt<R, W> {
    fn collect(&mut self) -> Result<InitRequest> {
        Ok(InitRequest {
            project_name: self.ask("Project name"),
            target_project_dir: self.ask("Target directory (for project)"),
            target_wasm_dir: self.ask("Target directory (for wasm)"),
            target_binding_dir: self.ask("Target directory (for binding)"),
        })
    }

    fn acknowledge(&mut self) -> Result<()> {
        writeln!(self.output, "Enter to continue.")?;
        self.output.flush()?;
        let mut line = String::new();
        if let Err(e) = self.input.read_line(&mut line) {
            tracing::warn!(error = %e, "failed to read acknowledgement");
        }
        Ok(())
    }
}

/// Answers read from a TOML file.
///
/// ```toml
/// project_name = "demo"
/// project_dir = "p"
/// wasm_dir = "w"
/// binding_dir = "b"
/// ```
#[derive(Debug, Clone)]
pub struct AnswerFile {
    path: PathBuf,
}

impl AnswerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse answers from TOML text. Missing keys become empty answers.
    pub fn parse(content: &str) -> Result<InitRequest> {
        toml::from_str(content).context("Failed to parse answers file")
    }
}

impl AnswerSource for AnswerFile {
    fn collect(&mut self) -> Result<InitRequest> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read answers file {:?}", self.path))?;
        Self::parse(&content).with_context(|| format!("Invalid answers in {:?}", self.path))
    }

    fn acknowledge(&mut self) -> Result<()> {
        Ok(())
    }
}
