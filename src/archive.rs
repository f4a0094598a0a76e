//! Zip extraction with path containment.
//!
//! Every entry is resolved against the destination and must land strictly
//! inside it. The first entry that would escape stops the extraction; nothing
//! from that entry onwards is written.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use crate::paths;

/// How an extraction ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Every entry was written.
    Complete { entries: usize },
    /// Stopped at an entry resolving outside the destination.
    Rejected { entry: String, written: usize },
}

impl Extraction {
    pub fn is_complete(&self) -> bool {
        matches!(self, Extraction::Complete { .. })
    }
}

/// Extract the zip archive at `src` into `dest`.
///
/// Directory entries are created recursively. File entries are created or
/// truncated, keeping the entry's unix mode bits when the archive records them.
pub fn extract(src: &Path, dest: &Path) -> Result<Extraction> {
    let file = File::open(src).with_context(|| format!("Failed to open archive {:?}", src))?;
    let mut archive = zip::ZipArchive::new(file)
        .with_context(|| format!("Failed to read zip archive {:?}", src))?;

    let root = paths::clean(dest);
    let mut written = 0;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("Failed to read entry #{} of {:?}", index, src))?;

        let name = entry.name().to_string();
        let target = paths::clean(&root.join(&name));

        if !paths::is_strictly_within(&root, &target) {
            tracing::warn!(entry = %name, dest = ?root, "archive entry escapes destination, extraction stopped");
            return Ok(Extraction::Rejected {
                entry: name,
                written,
            });
        }

        if entry.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory {:?}", target))?;
            written += 1;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            if let Some(mode) = entry.unix_mode() {
                options.mode(mode & 0o7777);
            }
        }

        let mut out = options
            .open(&target)
            .with_context(|| format!("Failed to create {:?}", target))?;
        io::copy(&mut entry, &mut out).with_context(|| format!("Failed to extract {}", name))?;

        tracing::debug!(entry = %name, "extracted");
        written += 1;
    }

    Ok(Extraction::Complete { entries: written })
}
