//! High-level operations.
//!
//! This module contains the implementation of caisson commands.

pub mod doctor;
pub mod orchestrate;

pub use doctor::{doctor, format_report, CheckResult, DoctorReport};
pub use orchestrate::{orchestrate, orchestrate_with, Orchestration, PreconditionError};
