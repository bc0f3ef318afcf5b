//! `caisson doctor` command

use anyhow::{bail, Context, Result};

use crate::cli::DoctorArgs;
use caisson::ops::{doctor, format_report};
use caisson::util::config::load_toolchain_config_for;

pub fn execute(_args: DoctorArgs, verbose: bool) -> Result<()> {
    let root = std::env::current_dir().context("failed to get current directory")?;
    let config = load_toolchain_config_for(&root);

    let report = doctor(&root, &config);
    print!("{}", format_report(&report, verbose));

    if !report.all_required_passed() {
        bail!("environment is not ready; fix the failed checks above");
    }

    Ok(())
}
