//! caisson CLI - build orchestrator for native extension modules

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("caisson=debug")
    } else {
        EnvFilter::new("caisson=info")
    };

    // Logs go to stderr; stdout is reserved for emitted plans.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Plan(args) => commands::plan::execute(args),
        Commands::Flags(args) => commands::flags::execute(args),
        Commands::Linkplan(args) => commands::linkplan::execute(args),
        Commands::Doctor(args) => commands::doctor::execute(args, cli.verbose),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
