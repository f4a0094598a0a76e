//! Build-tool distribution cache.
//!
//! Ensures the pinned Gradle distribution is present under the cache
//! directory and resolves its executable.
//!
//! # Design
//!
//! ```text
//! <cache>/gradle-8.3-bin.zip exists?  →  reuse (no network)
//!      ↓ no
//! create archive file, GET url, stream body into it
//!      ↓
//! archive::extract into <cache>/
//!      ↓
//! <cache>/gradle-8.3/bin/gradle
//! ```
//!
//! The existence check is deliberately weak: a truncated archive from an
//! interrupted run counts as cached and only fails later, when the bootstrap
//! executable is missing or broken.

mod download;

pub use download::{Download, HttpDownloader};

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::PathBuf;

use crate::archive::{self, Extraction};
use crate::config::Settings;
use crate::paths;

/// Ensure the distribution exists locally and return its executable path.
pub fn ensure(settings: &Settings, downloader: &dyn Download) -> Result<PathBuf> {
    let archive_path = settings.archive_path();
    let dist = &settings.distribution;

    if archive_path.exists() {
        tracing::debug!(archive = ?archive_path, "distribution archive cached, skipping download");
    } else {
        fs::create_dir_all(&settings.cache_dir)
            .with_context(|| format!("Failed to create cache dir {:?}", settings.cache_dir))?;

        let mut file = File::create(&archive_path)
            .with_context(|| format!("Failed to create {:?}", archive_path))?;
        let bytes = downloader
            .download(&dist.url, &mut file)
            .with_context(|| format!("Failed to download Gradle {}", dist.version))?;
        drop(file);
        tracing::debug!(bytes, archive = ?archive_path, "distribution downloaded");

        match archive::extract(&archive_path, &settings.cache_dir)? {
            Extraction::Complete { entries } => {
                tracing::debug!(entries, "distribution extracted");
            }
            Extraction::Rejected { entry, written } => {
                tracing::warn!(entry = %entry, written, "distribution archive partially extracted");
            }
        }
    }

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Ok(paths::absolute(&cwd, settings.executable_path()))
}
