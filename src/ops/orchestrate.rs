//! Top-level orchestration.
//!
//! Strict sequence, no reordering:
//! 1. Precondition gate: the manifest must sit in the execution root.
//! 2. Resolve the core config, triggering a source build if absent.
//! 3. Reconcile wrapper and core versions (one rebuild, one re-check).
//! 4. Compute the platform link plan.
//! 5. Hand back a planner; compile flags stay deferred until the caller
//!    knows the compiler.
//!
//! Every fatal path fires before any compile or link step, so there is
//! nothing to roll back: this layer writes no persistent state.

use std::path::{Path, PathBuf};

use anyhow::Result;
use thiserror::Error;

use crate::builder::plan::ExtensionPlanner;
use crate::core::locator::{BuildTrigger, CoreLocator};
use crate::core::manifest::{self, Manifest};
use crate::core::platform::HostOs;

/// The orchestrator was started outside a project root.
#[derive(Debug, Clone, Error)]
#[error(
    "no `Caisson.toml` found in `{}`\n\
     help: run caisson from the top level of the repository",
    .root.display()
)]
pub struct PreconditionError {
    /// Directory the orchestrator was started in.
    pub root: PathBuf,
}

/// Result of a successful orchestration: resolved inputs plus the planner
/// that assembles the final build plan.
#[derive(Debug)]
pub struct Orchestration {
    /// The wrapper manifest
    pub manifest: Manifest,

    /// The reconciled core config
    pub core: crate::core::CoreConfig,

    /// Planner over (manifest, core, platform)
    pub planner: ExtensionPlanner,
}

/// Run the orchestration sequence against the host platform.
pub fn orchestrate(root: &Path) -> Result<Orchestration> {
    orchestrate_on(root, CoreLocator::new(root), None)
}

/// Run the orchestration sequence with an injected build collaborator.
pub fn orchestrate_with(
    root: &Path,
    trigger: Box<dyn BuildTrigger>,
    os: HostOs,
) -> Result<Orchestration> {
    orchestrate_on(root, CoreLocator::with_trigger(root, trigger), Some(os))
}

fn orchestrate_on(
    root: &Path,
    locator: CoreLocator,
    os: Option<HostOs>,
) -> Result<Orchestration> {
    if !manifest::is_project_root(root) {
        return Err(PreconditionError {
            root: root.to_path_buf(),
        }
        .into());
    }

    let manifest = Manifest::load_from_root(root)?;
    tracing::debug!(
        "orchestrating {} {}",
        manifest.package.name,
        manifest.package.version
    );

    let core = locator.reconcile_version(&manifest.package.version)?;
    tracing::info!(
        "core {} resolved, linking {:?}",
        core.version,
        core.libraries
    );

    // The platform gate sits after the version contract: a stale core is
    // reported before a wrong host is.
    let os = match os {
        Some(os) => os,
        None => HostOs::host()?,
    };

    let planner = ExtensionPlanner::new(root, manifest.clone(), core.clone(), os);

    Ok(Orchestration {
        manifest,
        core,
        planner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::locator::{LocateError, CORE_BUILD_SCRIPT_REL, CORE_CONFIG_REL};
    use crate::core::manifest::MANIFEST_NAME;
    use semver::Version;
    use tempfile::TempDir;

    struct NeverTrigger;

    impl BuildTrigger for NeverTrigger {
        fn run(&self, script: &Path) -> Result<(), LocateError> {
            panic!("unexpected core build via {}", script.display());
        }
    }

    struct RewriteTrigger {
        config_path: PathBuf,
        payload: String,
    }

    impl BuildTrigger for RewriteTrigger {
        fn run(&self, _script: &Path) -> Result<(), LocateError> {
            std::fs::write(&self.config_path, &self.payload).unwrap();
            Ok(())
        }
    }

    fn write_fixture(root: &Path, wrapper: &str, core: &str) {
        std::fs::write(
            root.join(MANIFEST_NAME),
            format!("[package]\nname = \"adcmod\"\nversion = \"{wrapper}\"\n"),
        )
        .unwrap();

        let config = root.join(CORE_CONFIG_REL);
        std::fs::create_dir_all(config.parent().unwrap()).unwrap();
        std::fs::write(
            config,
            format!(r#"{{"version": "{core}", "libraries": ["adccore"]}}"#),
        )
        .unwrap();
    }

    #[test]
    fn test_orchestrate_happy_path_zero_rebuilds() {
        let tmp = TempDir::new().unwrap();
        write_fixture(tmp.path(), "1.2.0", "1.2.0");

        let result =
            orchestrate_with(tmp.path(), Box::new(NeverTrigger), HostOs::Linux).unwrap();

        assert_eq!(result.manifest.package.version, Version::new(1, 2, 0));
        assert_eq!(result.core.version, Version::new(1, 2, 0));
        assert_eq!(
            result.planner.link_plan().runtime_library_dirs,
            vec!["$ORIGIN", "$ORIGIN/adcmod/lib"]
        );
    }

    #[test]
    fn test_orchestrate_outside_project_root() {
        let tmp = TempDir::new().unwrap();

        let err =
            orchestrate_with(tmp.path(), Box::new(NeverTrigger), HostOs::Linux).unwrap_err();

        let precondition = err.downcast_ref::<PreconditionError>().unwrap();
        assert_eq!(precondition.root, tmp.path());
        assert!(err.to_string().contains("top level of the repository"));
    }

    #[test]
    fn test_orchestrate_missing_core_no_source() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(MANIFEST_NAME),
            "[package]\nname = \"adcmod\"\nversion = \"1.2.0\"\n",
        )
        .unwrap();

        let err =
            orchestrate_with(tmp.path(), Box::new(NeverTrigger), HostOs::Linux).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LocateError>(),
            Some(LocateError::ConfigMissing { .. })
        ));
    }

    #[test]
    fn test_orchestrate_rebuild_heals_mismatch() {
        let tmp = TempDir::new().unwrap();
        write_fixture(tmp.path(), "1.2.0", "1.1.0");
        let script = tmp.path().join(CORE_BUILD_SCRIPT_REL);
        std::fs::create_dir_all(script.parent().unwrap()).unwrap();
        std::fs::write(&script, "#!/bin/sh\n").unwrap();

        let trigger = RewriteTrigger {
            config_path: tmp.path().join(CORE_CONFIG_REL),
            payload: r#"{"version": "1.2.0", "libraries": ["adccore"]}"#.to_string(),
        };

        let result =
            orchestrate_with(tmp.path(), Box::new(trigger), HostOs::Linux).unwrap();
        assert_eq!(result.core.version, Version::new(1, 2, 0));
    }

    #[test]
    fn test_orchestrate_persistent_mismatch_is_fatal() {
        let tmp = TempDir::new().unwrap();
        write_fixture(tmp.path(), "1.2.0", "0.9.0");
        let script = tmp.path().join(CORE_BUILD_SCRIPT_REL);
        std::fs::create_dir_all(script.parent().unwrap()).unwrap();
        std::fs::write(&script, "#!/bin/sh\n").unwrap();

        let trigger = RewriteTrigger {
            config_path: tmp.path().join(CORE_CONFIG_REL),
            payload: r#"{"version": "0.9.0", "libraries": ["adccore"]}"#.to_string(),
        };

        let err = orchestrate_with(tmp.path(), Box::new(trigger), HostOs::Linux).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("1.2.0"));
        assert!(message.contains("0.9.0"));
    }
}
