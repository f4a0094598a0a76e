//! Single source of truth for the kirok filesystem layout.
//!
//! This module defines WHERE things live and how paths are compared.
//! It performs no I/O: every function here is lexical.
//!
//! # Distribution Cache (`$KIROK_CACHE_DIR`, default: system temp dir)
//!
//! ```text
//! <cache>/
//! ├── gradle-8.3-bin.zip       # Downloaded archive (presence = cached)
//! └── gradle-8.3/              # Extracted distribution
//!     └── bin/gradle           # Bootstrap executable
//! ```
//!
//! # Generated Project
//!
//! ```text
//! <project>/
//! ├── settings.gradle.kts      # Appended: plugin repositories
//! ├── build.gradle.kts         # Overwritten: kirok build script
//! └── src/commonMain/kotlin/
//!     └── Sample.kt            # Sample model/intent
//! ```

use std::path::{Component, Path, PathBuf};

// =============================================================================
// Distribution Cache
// =============================================================================

/// Distribution cache paths, relative to a cache directory.
pub mod cache {
    use super::*;

    /// Downloaded archive: `<cache>/{archive_name}`
    pub fn archive_path(cache_dir: &Path, archive_name: &str) -> PathBuf {
        cache_dir.join(archive_name)
    }

    /// Extracted distribution root: `<cache>/{dir_name}/`
    pub fn distribution_dir(cache_dir: &Path, dir_name: &str) -> PathBuf {
        cache_dir.join(dir_name)
    }

    /// Bootstrap executable: `<cache>/{dir_name}/bin/{executable}`
    pub fn executable_path(cache_dir: &Path, dir_name: &str, executable: &str) -> PathBuf {
        distribution_dir(cache_dir, dir_name)
            .join("bin")
            .join(executable)
    }
}

// =============================================================================
// Generated Project
// =============================================================================

/// Generated project paths. All functions take the project root.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use kirok::paths::project;
///
/// let root = Path::new("/home/user/demo");
/// assert_eq!(
///     project::sample_source(root),
///     Path::new("/home/user/demo/src/commonMain/kotlin/Sample.kt")
/// );
/// ```
pub mod project {
    use super::*;

    /// Gradle settings script: `settings.gradle.kts`
    pub fn settings_script(root: &Path) -> PathBuf {
        root.join("settings.gradle.kts")
    }

    /// Gradle build script: `build.gradle.kts`
    pub fn build_script(root: &Path) -> PathBuf {
        root.join("build.gradle.kts")
    }

    /// Common source set: `src/commonMain/kotlin/`
    pub fn source_dir(root: &Path) -> PathBuf {
        root.join("src").join("commonMain").join("kotlin")
    }

    /// Sample source file: `src/commonMain/kotlin/Sample.kt`
    pub fn sample_source(root: &Path) -> PathBuf {
        source_dir(root).join("Sample.kt")
    }
}

// =============================================================================
// Path arithmetic
// =============================================================================

/// Lexically clean a path: drop `.` segments and fold `..` into its parent.
///
/// `..` never climbs above a root; leading `..` of a relative path is kept.
pub fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Resolve operator input against `cwd` into an absolute, cleaned path.
///
/// Empty input resolves to `cwd` itself.
pub fn absolute(cwd: &Path, input: impl AsRef<Path>) -> PathBuf {
    clean(&cwd.join(input))
}

/// True when `candidate` lies strictly inside `root`.
///
/// Comparison is per component, so `/tmp/dest-evil` is not inside `/tmp/dest`.
pub fn is_strictly_within(root: &Path, candidate: &Path) -> bool {
    let root = clean(root);
    let candidate = clean(candidate);
    candidate != root && candidate.starts_with(&root)
}

/// Render a path with `/` separators regardless of host convention.
pub fn to_slash(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        rendered.into_owned()
    } else {
        rendered.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Relative path from directory `base` to `target`, `/`-separated.
///
/// Both paths should be absolute. Returns `None` when they share no root
/// (e.g. different drives), since no relative form exists.
pub fn relative_slash(base: &Path, target: &Path) -> Option<String> {
    let base = clean(base);
    let target = clean(target);

    let base_parts: Vec<Component> = base.components().collect();
    let target_parts: Vec<Component> = target.components().collect();

    let base_anchor: Vec<Component> = base.components().take_while(is_anchor).collect();
    let target_anchor: Vec<Component> = target.components().take_while(is_anchor).collect();
    if base_anchor != target_anchor {
        return None;
    }

    let common = base_parts
        .iter()
        .zip(target_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<String> = Vec::new();
    for _ in common..base_parts.len() {
        segments.push("..".to_string());
    }
    for part in &target_parts[common..] {
        segments.push(part.as_os_str().to_string_lossy().into_owned());
    }

    if segments.is_empty() {
        Some(".".to_string())
    } else {
        Some(segments.join("/"))
    }
}

fn is_anchor(component: &Component<'_>) -> bool {
    matches!(component, Component::Prefix(_) | Component::RootDir)
}
