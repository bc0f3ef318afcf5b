//! Wrapper package manifest (`Caisson.toml`).
//!
//! The manifest declares the extension wrapper: its name, its own version
//! (reconciled against the core library's reported version before any link
//! step), and where the extension sources live. Its presence at the
//! execution root doubles as the precondition gate: the orchestrator only
//! runs from the top level of a repository.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use semver::Version;
use serde::{Deserialize, Serialize};

/// Manifest file name, expected at the repository root.
pub const MANIFEST_NAME: &str = "Caisson.toml";

/// The wrapper package manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Package metadata
    pub package: PackageSection,

    /// Extension source layout
    #[serde(default)]
    pub extension: ExtensionSection,
}

/// `[package]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name (also names the bundled runtime library directory)
    pub name: String,

    /// Wrapper version; must match the core library's version exactly
    pub version: Version,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `[extension]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionSection {
    /// Source globs, relative to the repository root
    pub sources: Vec<String>,

    /// Extra include directories beyond the core headers
    pub include_dirs: Vec<PathBuf>,
}

impl Default for ExtensionSection {
    fn default() -> Self {
        ExtensionSection {
            sources: vec!["extension/*.cc".to_string()],
            include_dirs: Vec::new(),
        }
    }
}

impl Manifest {
    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Load the manifest from a repository root.
    pub fn load_from_root(root: &Path) -> Result<Self> {
        Self::load(&manifest_path(root))
    }

    /// The package-relative directory holding bundled shared libraries.
    ///
    /// This is a loader search token (`<name>/lib`), not a filesystem path:
    /// it is spliced into rpath entries and `$ORIGIN` tokens verbatim.
    pub fn package_lib_dir(&self) -> String {
        format!("{}/lib", self.package.name)
    }
}

/// Path of the manifest under a repository root.
pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_NAME)
}

/// Whether a directory is a project root (manifest present).
pub fn is_project_root(root: &Path) -> bool {
    manifest_path(root).is_file()
}
