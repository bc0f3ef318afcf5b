//! Extension build plan assembly.
//!
//! The planner composes the core config, the platform link plan, and the
//! manifest's source layout into one BuildPlan: the complete, ordered set
//! of instructions the downstream compilation/packaging tool consumes.
//! Compile flags are the one late-bound piece: they depend on the actual
//! compiler, which is only known when the downstream tool is about to
//! invoke it, so the planner exposes them as a separate hook.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::link_policy::{link_plan_for, LinkPlan};
use crate::builder::probe::CapabilityCache;
use crate::builder::profile::{self, UnsupportedCompilerError};
use crate::core::compiler::CompilerFamily;
use crate::core::core_config::CoreConfig;
use crate::core::locator::CORE_INCLUDE_REL;
use crate::core::manifest::Manifest;
use crate::core::platform::HostOs;

/// The complete build plan handed to the downstream tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildPlan {
    /// Extension module name
    pub name: String,

    /// Wrapper version (matches the core version once reconciled)
    pub version: semver::Version,

    /// Source files, in glob order
    pub sources: Vec<PathBuf>,

    /// Include directories, in order
    pub include_dirs: Vec<PathBuf>,

    /// Libraries to link, in order
    pub libraries: Vec<String>,

    /// Library search directories, in order
    pub library_dirs: Vec<String>,

    /// Extra compile flags, in probe-discovery order
    pub compile_flags: Vec<String>,

    /// Extra link arguments, in order
    pub extra_link_args: Vec<String>,

    /// Runtime library search tokens, in order
    pub runtime_library_dirs: Vec<String>,
}

/// Composes the build plan for the extension module.
#[derive(Debug)]
pub struct ExtensionPlanner {
    root: PathBuf,
    manifest: Manifest,
    core: CoreConfig,
    link: LinkPlan,
    os: HostOs,
}

impl ExtensionPlanner {
    /// Create a planner from resolved inputs.
    pub fn new(root: impl Into<PathBuf>, manifest: Manifest, core: CoreConfig, os: HostOs) -> Self {
        let link = link_plan_for(os, &manifest.package_lib_dir());
        ExtensionPlanner {
            root: root.into(),
            manifest,
            core,
            link,
            os,
        }
    }

    /// The platform link plan in effect.
    pub fn link_plan(&self) -> &LinkPlan {
        &self.link
    }

    /// The host platform the plan targets.
    pub fn os(&self) -> HostOs {
        self.os
    }

    /// Flag-computation hook, deferred until the compiler is known.
    pub fn compile_flags(
        &self,
        family: CompilerFamily,
        cache: &mut CapabilityCache,
    ) -> Result<Vec<String>, UnsupportedCompilerError> {
        profile::flags_for(family, self.os, cache)
    }

    /// Extension sources matched by the manifest globs, in glob order.
    pub fn sources(&self) -> Result<Vec<PathBuf>> {
        let mut sources = Vec::new();

        for pattern in &self.manifest.extension.sources {
            let full = self.root.join(pattern);
            let full = full.to_str().with_context(|| {
                format!("source glob is not valid UTF-8: {}", full.display())
            })?;

            let matches = glob::glob(full)
                .with_context(|| format!("invalid source glob: {}", pattern))?;

            for entry in matches {
                let path = entry.with_context(|| format!("failed to read glob entry for {}", pattern))?;
                if !sources.contains(&path) {
                    sources.push(path);
                }
            }
        }

        if sources.is_empty() {
            tracing::warn!(
                "no extension sources matched {:?}",
                self.manifest.extension.sources
            );
        }

        Ok(sources)
    }

    /// Include directories: core headers first, then core hints, then
    /// manifest extras.
    pub fn include_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.root.join(CORE_INCLUDE_REL)];
        dirs.extend(self.core.include_dirs.iter().map(|d| self.root.join(d)));
        dirs.extend(
            self.manifest
                .extension
                .include_dirs
                .iter()
                .map(|d| self.root.join(d)),
        );
        dirs
    }

    /// Assemble the final plan around an already-computed flag set.
    pub fn plan(&self, compile_flags: Vec<String>) -> Result<BuildPlan> {
        Ok(BuildPlan {
            name: self.manifest.package.name.clone(),
            version: self.manifest.package.version.clone(),
            sources: self.sources()?,
            include_dirs: self.include_dirs(),
            libraries: self.core.libraries.clone(),
            library_dirs: vec![self.manifest.package_lib_dir()],
            compile_flags,
            extra_link_args: self.link.extra_link_args.clone(),
            runtime_library_dirs: self.link.runtime_library_dirs.clone(),
        })
    }
}
