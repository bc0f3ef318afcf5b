//! Build orchestration core.
//!
//! This module implements the capability-probing and link-policy logic:
//! which compiler flags are safe to use, and how the produced module finds
//! its co-located shared libraries at load time.

pub mod link_policy;
pub mod plan;
pub mod probe;
pub mod profile;

pub use link_policy::{link_plan_for, LinkPlan};
pub use plan::{BuildPlan, ExtensionPlanner};
pub use probe::{CapabilityCache, CompileProbe, FlagProbe};
pub use profile::{flags_for, UnsupportedCompilerError, STANDARD_CANDIDATES};
