//! Command implementations

pub mod completions;
pub mod doctor;
pub mod flags;
pub mod linkplan;
pub mod plan;
