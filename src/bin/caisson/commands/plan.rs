//! `caisson plan` command

use anyhow::{Context, Result};

use crate::cli::PlanArgs;
use caisson::builder::{CapabilityCache, CompileProbe};
use caisson::core::compiler::detect_compiler;
use caisson::ops::orchestrate;
use caisson::util::config::load_toolchain_config_for;

pub fn execute(args: PlanArgs) -> Result<()> {
    let root = std::env::current_dir().context("failed to get current directory")?;

    let orchestration = orchestrate(&root)?;
    let config = load_toolchain_config_for(&root);

    // Flags are late-bound: only now, at emission time, is the compiler
    // identity pinned down.
    let compile_flags = if args.no_probe {
        Vec::new()
    } else {
        let compiler = detect_compiler(&config)?;
        tracing::info!("probing {}", compiler);

        let mut cache = CapabilityCache::new(Box::new(CompileProbe::new(&compiler.path)));
        let mut flags = orchestration.planner.compile_flags(compiler.family, &mut cache)?;
        flags.extend(config.toolchain.cxxflags.iter().cloned());
        flags
    };

    let plan = orchestration.planner.plan(compile_flags)?;
    let json = serde_json::to_string_pretty(&plan)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write plan to {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
