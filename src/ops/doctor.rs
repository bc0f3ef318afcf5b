//! Environment health checks.
//!
//! The `doctor` command performs fast checks that mirror the fatal paths
//! of the orchestrator, so a user can see every problem at once instead
//! of hitting them one rebuild at a time.
//!
//! ## Checks Performed
//!
//! - Manifest present at the execution root
//! - Core config artifact present and parseable
//! - Wrapper/core version agreement
//! - Core build entry point (optional; absent just means no source)
//! - C++ compiler availability

use std::path::{Path, PathBuf};

use crate::core::compiler::detect_compiler;
use crate::core::locator::CoreLocator;
use crate::core::manifest::{self, Manifest, MANIFEST_NAME};
use crate::util::config::ToolchainConfig;

/// Result of a single health check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Path involved (if applicable)
    pub path: Option<PathBuf>,

    /// Whether this check is required or informational
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
            required: true,
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: false,
            message: message.into(),
            path: None,
            required: true,
        }
    }

    /// Mark this check as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set the involved path.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }
}

/// Summary of all health checks.
#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,
}

impl DoctorReport {
    /// Check if all required checks passed.
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }
}

/// Run all health checks against a project root.
pub fn doctor(root: &Path, config: &ToolchainConfig) -> DoctorReport {
    let mut report = DoctorReport::default();

    let manifest = check_manifest(root, &mut report);
    check_core(root, manifest.as_ref(), &mut report);
    check_compiler(config, &mut report);

    report
}

fn check_manifest(root: &Path, report: &mut DoctorReport) -> Option<Manifest> {
    if !manifest::is_project_root(root) {
        report.checks.push(
            CheckResult::fail(
                "manifest",
                format!("no {MANIFEST_NAME} here; run from the repository root"),
            )
            .with_path(root.to_path_buf()),
        );
        return None;
    }

    match Manifest::load_from_root(root) {
        Ok(manifest) => {
            report.checks.push(CheckResult::pass(
                "manifest",
                format!("{} {}", manifest.package.name, manifest.package.version),
            ));
            Some(manifest)
        }
        Err(e) => {
            report
                .checks
                .push(CheckResult::fail("manifest", format!("{e:#}")));
            None
        }
    }
}

fn check_core(root: &Path, manifest: Option<&Manifest>, report: &mut DoctorReport) {
    let locator = CoreLocator::new(root);

    let script = locator.build_script_path();
    if script.is_file() {
        report.checks.push(
            CheckResult::pass("core source", "build entry point present")
                .optional()
                .with_path(script),
        );
    } else {
        report.checks.push(
            CheckResult::fail("core source", "no build entry point (prebuilt core expected)")
                .optional()
                .with_path(script),
        );
    }

    match locator.resolve() {
        Ok(core) => {
            report.checks.push(
                CheckResult::pass("core config", format!("core {}", core.version))
                    .with_path(locator.config_path()),
            );

            if let Some(manifest) = manifest {
                if core.version == manifest.package.version {
                    report
                        .checks
                        .push(CheckResult::pass("core version", "matches wrapper version"));
                } else {
                    report.checks.push(CheckResult::fail(
                        "core version",
                        format!(
                            "core {} != wrapper {}; a rebuild will be attempted at plan time",
                            core.version, manifest.package.version
                        ),
                    ));
                }
            }
        }
        Err(e) => {
            report.checks.push(
                CheckResult::fail("core config", format!("{e:#}"))
                    .with_path(locator.config_path()),
            );
        }
    }
}

fn check_compiler(config: &ToolchainConfig, report: &mut DoctorReport) {
    match detect_compiler(config) {
        Ok(compiler) => {
            let message = match compiler.version_line() {
                Some(version) => version,
                None => compiler.to_string(),
            };
            report.checks.push(
                CheckResult::pass("compiler", message).with_path(compiler.path.clone()),
            );
        }
        Err(e) => {
            report
                .checks
                .push(CheckResult::fail("compiler", format!("{e:#}")));
        }
    }
}

/// Format a report for terminal output.
pub fn format_report(report: &DoctorReport, verbose: bool) -> String {
    let mut out = String::new();

    for check in &report.checks {
        let mark = if check.passed { "ok" } else { "FAIL" };
        out.push_str(&format!("{:>4}  {}: {}\n", mark, check.name, check.message));

        if verbose {
            if let Some(ref path) = check.path {
                out.push_str(&format!("      --> {}\n", path.display()));
            }
        }
    }

    if report.all_required_passed() {
        out.push_str("\nall required checks passed\n");
    } else {
        out.push_str("\nsome required checks failed\n");
    }

    out
}
