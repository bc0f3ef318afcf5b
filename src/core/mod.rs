//! Core data structures for caisson.
//!
//! This module contains the foundational types of the orchestrator:
//! - The wrapper manifest and its precondition gate
//! - The core library's config artifact and locator
//! - Compiler and host platform identity

pub mod compiler;
pub mod core_config;
pub mod locator;
pub mod manifest;
pub mod platform;

pub use compiler::{detect_compiler, CompilerFamily, CompilerIdentity};
pub use core_config::CoreConfig;
pub use locator::{BuildTrigger, CoreLocator, LocateError, ProcessBuildTrigger};
pub use manifest::{is_project_root, manifest_path, Manifest, MANIFEST_NAME};
pub use platform::{HostOs, UnsupportedPlatformError};
