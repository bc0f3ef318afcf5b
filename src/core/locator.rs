//! Locating (and, when necessary, building) the core library.
//!
//! The core library is an independently versioned component that may be
//! present in three states: built (config artifact on disk), source-only
//! (build entry point on disk, no config), or absent. The locator reads
//! the config, triggers the external build for the source-only case, and
//! enforces the version contract between wrapper and core.
//!
//! The external build is a trusted, blocking, one-shot process call; its
//! exit code is authoritative and a failure is never retried.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::core_config::CoreConfig;
use crate::util::process::ProcessBuilder;

/// Core config artifact, relative to the repository root.
pub const CORE_CONFIG_REL: &str = "extension/core/core_config.json";

/// Core build entry point, relative to the repository root.
pub const CORE_BUILD_SCRIPT_REL: &str = "core/build.sh";

/// Core headers, relative to the repository root.
pub const CORE_INCLUDE_REL: &str = "extension/core/include";

/// Failures while resolving or rebuilding the core library.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error(
        "core config not found at `{}`\n\
         help: download or install the core library, or build it from source,\n\
         before packaging the extension",
        .path.display()
    )]
    ConfigMissing { path: PathBuf },

    #[error("failed to read core config at `{}`", .path.display())]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse core config at `{}`", .path.display())]
    ConfigInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to run core build script `{}`", .script.display())]
    BuildSpawn {
        script: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("core build script `{}` failed with exit code {:?}", .script.display(), .code)]
    BuildFailed { script: PathBuf, code: Option<i32> },

    #[error(
        "version mismatch between extension wrapper (== {ours}) and core (== {core})"
    )]
    VersionMismatch {
        ours: semver::Version,
        core: semver::Version,
    },
}

/// External build collaborator.
///
/// One method: run the entry point and report success or failure. The
/// production implementation spawns a process; tests substitute scripted
/// behavior so orchestration logic runs without real subprocesses.
pub trait BuildTrigger {
    fn run(&self, script: &Path) -> Result<(), LocateError>;
}

/// Runs the build entry point as a blocking subprocess.
#[derive(Debug, Default)]
pub struct ProcessBuildTrigger;

impl BuildTrigger for ProcessBuildTrigger {
    fn run(&self, script: &Path) -> Result<(), LocateError> {
        tracing::info!("building core library via {}", script.display());

        let status = ProcessBuilder::new(script)
            .status()
            .map_err(|source| LocateError::BuildSpawn {
                script: script.to_path_buf(),
                source,
            })?;

        if !status.success() {
            return Err(LocateError::BuildFailed {
                script: script.to_path_buf(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

/// Resolves the on-disk state of the core library.
pub struct CoreLocator {
    root: PathBuf,
    trigger: Box<dyn BuildTrigger>,
}

impl CoreLocator {
    /// Create a locator for a repository root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_trigger(root, Box::new(ProcessBuildTrigger))
    }

    /// Create a locator with an injected build collaborator.
    pub fn with_trigger(root: impl Into<PathBuf>, trigger: Box<dyn BuildTrigger>) -> Self {
        CoreLocator {
            root: root.into(),
            trigger,
        }
    }

    /// Path of the core config artifact.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CORE_CONFIG_REL)
    }

    /// Path of the core build entry point.
    pub fn build_script_path(&self) -> PathBuf {
        self.root.join(CORE_BUILD_SCRIPT_REL)
    }

    /// Path of the core header directory.
    pub fn core_include_dir(&self) -> PathBuf {
        self.root.join(CORE_INCLUDE_REL)
    }

    /// Is the config artifact present on disk?
    pub fn is_config_present(&self) -> bool {
        self.config_path().is_file()
    }

    /// Read and parse the core config.
    pub fn resolve(&self) -> Result<CoreConfig, LocateError> {
        let path = self.config_path();

        if !path.is_file() {
            return Err(LocateError::ConfigMissing { path });
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| {
            LocateError::ConfigUnreadable {
                path: path.clone(),
                source,
            }
        })?;

        serde_json::from_str(&contents)
            .map_err(|source| LocateError::ConfigInvalid { path, source })
    }

    /// Trigger a build of the core library, if it exists in source form.
    ///
    /// A missing entry point means this checkout has no core source; that
    /// is not an error here, the caller surfaces the missing config.
    pub fn trigger_build(&self) -> Result<(), LocateError> {
        let script = self.build_script_path();
        if !script.is_file() {
            tracing::debug!(
                "no core build entry point at {}, skipping build",
                script.display()
            );
            return Ok(());
        }

        self.trigger.run(&script)
    }

    /// Resolve the config, building the core once if it is absent.
    pub fn ensure_present(&self) -> Result<CoreConfig, LocateError> {
        match self.resolve() {
            Ok(config) => Ok(config),
            Err(LocateError::ConfigMissing { .. }) => {
                self.trigger_build()?;
                self.resolve()
            }
            Err(e) => Err(e),
        }
    }

    /// Enforce the version contract between wrapper and core.
    ///
    /// Versions must match exactly. A mismatch gets exactly one rebuild
    /// attempt (stale checkouts commonly fix themselves this way) and one
    /// re-read; a mismatch that survives the rebuild is fatal.
    pub fn reconcile_version(
        &self,
        ours: &semver::Version,
    ) -> Result<CoreConfig, LocateError> {
        let config = self.ensure_present()?;

        if config.version == *ours {
            return Ok(config);
        }

        tracing::warn!(
            "core version {} does not match wrapper version {}, rebuilding core",
            config.version,
            ours
        );
        self.trigger_build()?;

        let config = self.resolve()?;
        if config.version != *ours {
            return Err(LocateError::VersionMismatch {
                ours: ours.clone(),
                core: config.version,
            });
        }

        Ok(config)
    }
}
