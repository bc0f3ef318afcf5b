//! Shared utilities

pub mod config;
pub mod process;

pub use config::{load_toolchain_config_for, ToolchainConfig};
pub use process::ProcessBuilder;
