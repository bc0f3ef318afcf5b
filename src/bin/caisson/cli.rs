//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// caisson - build orchestrator for native extension modules
#[derive(Parser)]
#[command(name = "caisson")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the core library and emit the extension build plan
    Plan(PlanArgs),

    /// Probe the compiler and show the resulting compile flags
    Flags(FlagsArgs),

    /// Show the platform link plan
    Linkplan(LinkplanArgs),

    /// Check the environment for problems
    Doctor(DoctorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct PlanArgs {
    /// Write the plan to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit the plan without probing compiler flags
    #[arg(long)]
    pub no_probe: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Probe this compiler instead of the detected one
    #[arg(long, env = "CXX")]
    pub compiler: Option<PathBuf>,
}

#[derive(Args)]
pub struct LinkplanArgs {
    /// Platform token to plan for (defaults to the host)
    #[arg(long)]
    pub platform: Option<String>,
}

#[derive(Args)]
pub struct DoctorArgs {}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
