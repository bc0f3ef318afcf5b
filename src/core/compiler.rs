//! Compiler identity detection.
//!
//! The orchestrator never hardcodes a compiler. Detection priority:
//! 1. `CXX` environment variable
//! 2. Toolchain config override (`.caisson/toolchain.toml` or `~/.caisson/toolchain.toml`)
//! 3. Auto-detection (searching PATH for common C++ compilers)
//!
//! The identity is only a lookup key for policy decisions: the family
//! selects which optional flag candidates are worth probing.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::util::config::ToolchainConfig;
use crate::util::process::ProcessBuilder;

/// The family of a detected compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerFamily {
    /// GCC (GNU Compiler Collection)
    Gcc,
    /// Clang/LLVM
    Clang,
    /// Apple Clang (macOS)
    AppleClang,
    /// Anything we could not classify
    Other,
}

impl CompilerFamily {
    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::AppleClang => "apple-clang",
            CompilerFamily::Other => "other",
        }
    }

    /// Whether this family takes GCC-style diagnostic flags.
    ///
    /// Unrecognized families get the mandatory standard flag only; probing
    /// diagnostic candidates against an unknown driver wastes invocations.
    pub fn is_unix_like(&self) -> bool {
        !matches!(self, CompilerFamily::Other)
    }
}

impl std::fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active C++ compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerIdentity {
    /// Path to the compiler driver
    pub path: PathBuf,
    /// Detected family
    pub family: CompilerFamily,
}

impl CompilerIdentity {
    /// Create an identity with an explicitly known family.
    pub fn new(path: impl Into<PathBuf>, family: CompilerFamily) -> Self {
        CompilerIdentity {
            path: path.into(),
            family,
        }
    }

    /// Create an identity from a path, sniffing the family.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let family = detect_family(&path);
        CompilerIdentity { path, family }
    }

    /// Version line reported by the compiler, if it runs at all.
    pub fn version_line(&self) -> Option<String> {
        let output = ProcessBuilder::new(&self.path).arg("--version").exec().ok()?;
        if !output.status.success() {
            return None;
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout.lines().next().map(|l| l.trim().to_string())
    }
}

impl std::fmt::Display for CompilerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.path.display(), self.family)
    }
}

/// Detect the active C++ compiler.
pub fn detect_compiler(config: &ToolchainConfig) -> Result<CompilerIdentity> {
    // CXX environment variable wins
    if let Ok(cxx) = std::env::var("CXX") {
        if !cxx.is_empty() {
            return Ok(CompilerIdentity::from_path(cxx));
        }
    }

    // Toolchain config override
    if let Some(ref cxx) = config.toolchain.cxx {
        if cxx.exists() {
            return Ok(CompilerIdentity::from_path(cxx));
        }
        tracing::warn!("configured C++ compiler not found: {}", cxx.display());
    }

    // Search PATH for common compiler names
    for name in ["c++", "g++", "clang++"] {
        if let Ok(path) = which::which(name) {
            return Ok(CompilerIdentity::from_path(path));
        }
    }

    bail!(
        "no C++ compiler found\n\
         \n\
         caisson requires a C++ compiler (g++ or clang++).\n\
         Set the CXX environment variable, configure one in .caisson/toolchain.toml,\n\
         or install a compiler."
    )
}

/// Detect whether the compiler is GCC, Clang, or Apple Clang.
fn detect_family(path: &Path) -> CompilerFamily {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();

    if name.contains("clang") {
        return detect_clang_variant(path);
    }
    if name.contains("g++") || name.contains("gcc") {
        return CompilerFamily::Gcc;
    }

    // Generic names like `c++` need the version banner
    let output = ProcessBuilder::new(path).arg("--version").exec();
    if let Ok(output) = output {
        let stdout = String::from_utf8_lossy(&output.stdout).to_lowercase();
        if stdout.contains("clang") {
            return detect_clang_variant(path);
        }
        if stdout.contains("gcc") || stdout.contains("free software foundation") {
            return CompilerFamily::Gcc;
        }
    }

    CompilerFamily::Other
}

/// Distinguish Apple Clang from upstream Clang.
fn detect_clang_variant(path: &Path) -> CompilerFamily {
    let output = ProcessBuilder::new(path).arg("--version").exec();
    if let Ok(output) = output {
        let stdout = String::from_utf8_lossy(&output.stdout).to_lowercase();
        if stdout.contains("apple") {
            return CompilerFamily::AppleClang;
        }
    }
    CompilerFamily::Clang
}
