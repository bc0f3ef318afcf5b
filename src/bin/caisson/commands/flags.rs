//! `caisson flags` command

use anyhow::{Context, Result};

use crate::cli::FlagsArgs;
use caisson::builder::{flags_for, CapabilityCache, CompileProbe};
use caisson::core::compiler::{detect_compiler, CompilerIdentity};
use caisson::core::platform::HostOs;
use caisson::util::config::load_toolchain_config_for;

pub fn execute(args: FlagsArgs) -> Result<()> {
    let root = std::env::current_dir().context("failed to get current directory")?;
    let config = load_toolchain_config_for(&root);

    let compiler = match args.compiler {
        Some(path) => CompilerIdentity::from_path(path),
        None => detect_compiler(&config)?,
    };
    let os = HostOs::host()?;

    println!("# Compile flags for {} on {}:", compiler, os);

    let mut cache = CapabilityCache::new(Box::new(CompileProbe::new(&compiler.path)));
    let flags = flags_for(compiler.family, os, &mut cache)?;

    for flag in &flags {
        println!("  {}", flag);
    }

    for flag in &config.toolchain.cxxflags {
        println!("  {}    # from: toolchain config, not probed", flag);
    }

    Ok(())
}
