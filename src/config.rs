//! Runtime settings for kirok.
//!
//! The Gradle distribution is pinned at build time; only the cache location
//! can be moved (`KIROK_CACHE_DIR`), which tests and sandboxed CI rely on.

use std::path::PathBuf;

use crate::paths;

/// Environment variable overriding the distribution cache directory.
pub const CACHE_DIR_ENV: &str = "KIROK_CACHE_DIR";

/// kirok Gradle plugin version used when `init` gets no version argument.
pub const DEFAULT_PLUGIN_VERSION: &str = "1.1.0";

/// Build script dialect passed to `gradle init --dsl`.
pub const BUILD_DSL: &str = "kotlin";

/// A pinned build-tool distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Archive download URL
    pub url: String,
    /// Distribution version, informational
    pub version: String,
    /// Top-level directory inside the archive
    pub dir_name: String,
    /// Cached archive file name
    pub archive_name: String,
    /// Executable under `<dir_name>/bin/`
    pub executable: String,
}

impl Distribution {
    /// Gradle 8.3 binary distribution.
    pub fn gradle() -> Self {
        let version = "8.3";
        Self {
            url: format!("https://downloads.gradle.org/distributions/gradle-{version}-bin.zip"),
            version: version.to_string(),
            dir_name: format!("gradle-{version}"),
            archive_name: format!("gradle-{version}-bin.zip"),
            executable: if cfg!(windows) {
                "gradle.bat".to_string()
            } else {
                "gradle".to_string()
            },
        }
    }
}

/// Settings threaded through the init workflow.
#[derive(Debug, Clone)]
pub struct Settings {
    pub distribution: Distribution,
    pub cache_dir: PathBuf,
    pub dsl: String,
    pub default_plugin_version: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            distribution: Distribution::gradle(),
            cache_dir: std::env::temp_dir(),
            dsl: BUILD_DSL.to_string(),
            default_plugin_version: DEFAULT_PLUGIN_VERSION.to_string(),
        }
    }
}

impl Settings {
    /// Defaults, with the cache directory taken from `KIROK_CACHE_DIR` when set.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(dir) = std::env::var_os(CACHE_DIR_ENV).filter(|v| !v.is_empty()) {
            settings.cache_dir = PathBuf::from(dir);
        }
        settings
    }

    /// Cached archive path.
    pub fn archive_path(&self) -> PathBuf {
        paths::cache::archive_path(&self.cache_dir, &self.distribution.archive_name)
    }

    /// Path the executable will have once the distribution is extracted.
    pub fn executable_path(&self) -> PathBuf {
        paths::cache::executable_path(
            &self.cache_dir,
            &self.distribution.dir_name,
            &self.distribution.executable,
        )
    }
}
