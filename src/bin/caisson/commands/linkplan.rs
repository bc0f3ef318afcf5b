//! `caisson linkplan` command

use anyhow::{Context, Result};

use crate::cli::LinkplanArgs;
use caisson::builder::link_plan_for;
use caisson::core::manifest::Manifest;
use caisson::core::platform::HostOs;

pub fn execute(args: LinkplanArgs) -> Result<()> {
    let root = std::env::current_dir().context("failed to get current directory")?;
    let manifest = Manifest::load_from_root(&root)?;

    let os = match args.platform {
        Some(ref token) => HostOs::from_token(token)?,
        None => HostOs::host()?,
    };

    let plan = link_plan_for(os, &manifest.package_lib_dir());

    println!("Link plan for `{}` on {}:", manifest.package.name, os);
    println!();

    if plan.extra_link_args.is_empty() && plan.runtime_library_dirs.is_empty() {
        println!("  (empty)");
        return Ok(());
    }

    for arg in &plan.extra_link_args {
        println!("  {}    # link argument", arg);
    }

    for dir in &plan.runtime_library_dirs {
        println!("  {}    # runtime search path", dir);
    }

    Ok(())
}
