//! caisson - build orchestrator for native extension modules
//!
//! This crate prepares, configures, and links a native extension module
//! against an external, independently-versioned core library, and emits
//! the resulting build plan for a downstream compilation/packaging tool.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

pub use builder::{BuildPlan, CapabilityCache, CompileProbe, ExtensionPlanner, LinkPlan};
pub use core::{CompilerIdentity, CoreConfig, CoreLocator, HostOs, Manifest};
pub use ops::{orchestrate, Orchestration};
