//! Platform link policy.
//!
//! The extension module ships its shared libraries inside the package
//! rather than installing them system-wide, so the runtime loader must be
//! told to search relative to the module itself. The two recognized
//! platforms express that differently: Mach-O embeds rpath entries at
//! link time, ELF takes `$ORIGIN` tokens through the runtime search path.

use serde::{Deserialize, Serialize};

use crate::core::platform::HostOs;

/// Platform-specific link arguments and runtime search paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPlan {
    /// Extra arguments for the link step, in order
    pub extra_link_args: Vec<String>,

    /// Runtime library search tokens, in order
    pub runtime_library_dirs: Vec<String>,
}

/// Compute the link plan for a platform.
///
/// `package_lib_dir` is the package-relative library directory token
/// (e.g. `adcmod/lib`). Pure: the same inputs always produce the same
/// plan. Unrecognized platforms never reach this function; parsing the
/// platform token fails first.
pub fn link_plan_for(os: HostOs, package_lib_dir: &str) -> LinkPlan {
    match os {
        HostOs::MacOs => LinkPlan {
            extra_link_args: vec![
                "-Wl,-rpath,.".to_string(),
                format!("-Wl,-rpath,@loader_path/{}", package_lib_dir),
            ],
            runtime_library_dirs: Vec::new(),
        },
        HostOs::Linux => LinkPlan {
            extra_link_args: Vec::new(),
            runtime_library_dirs: vec![
                "$ORIGIN".to_string(),
                format!("$ORIGIN/{}", package_lib_dir),
            ],
        },
    }
}
