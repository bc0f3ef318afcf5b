//! Compile flag selection for the extension module.
//!
//! Exactly one flag is load-bearing: the C++ language standard. The rest
//! (deployment flags on macOS, strict diagnostics on GCC/Clang) is
//! best-effort: candidates that probe false are dropped silently, never
//! substituted. The output preserves discovery order so the resulting
//! compile command is reproducible across runs.

use thiserror::Error;

use crate::builder::probe::CapabilityCache;
use crate::core::compiler::CompilerFamily;
use crate::core::platform::HostOs;

/// Language standard candidates, newest first. The first supported one
/// wins; probing stops there.
pub const STANDARD_CANDIDATES: &[&str] = &["-std=c++17", "-std=c++14", "-std=c++11"];

/// ABI/deployment candidates probed on Darwin-like hosts.
const DARWIN_CANDIDATES: &[&str] = &["-stdlib=libc++", "-mmacosx-version-min=10.7"];

/// Strict diagnostic candidates probed for unix-class compiler families.
const DIAGNOSTIC_CANDIDATES: &[&str] = &[
    "-fvisibility=hidden",
    "-Werror",
    "-Wall",
    "-Wextra",
    "-pedantic",
    "-Wnon-virtual-dtor",
    "-Woverloaded-virtual",
    "-Wcast-align",
    "-Wconversion",
    "-Wsign-conversion",
    "-Wmisleading-indentation",
    "-Wduplicated-cond",
    "-Wduplicated-branches",
    "-Wlogical-op",
    "-Wdouble-promotion",
    "-Wformat=2",
    "-Wno-error=deprecated-declarations",
];

/// No candidate language standard was accepted.
#[derive(Debug, Clone, Error)]
#[error("unsupported compiler -- at least C++11 support is needed")]
pub struct UnsupportedCompilerError;

/// Compute the ordered compile flag set for the extension module.
///
/// Fails only when no language-standard candidate probes successfully;
/// there is no safe default standard to assume, and no partial flag set
/// is returned in that case.
pub fn flags_for(
    family: CompilerFamily,
    os: HostOs,
    cache: &mut CapabilityCache,
) -> Result<Vec<String>, UnsupportedCompilerError> {
    let mut flags = Vec::new();

    if os == HostOs::MacOs {
        for candidate in DARWIN_CANDIDATES {
            if cache.supports(candidate) {
                flags.push((*candidate).to_string());
            }
        }
    }

    flags.push(standard_flag(cache)?.to_string());

    if family.is_unix_like() {
        for candidate in DIAGNOSTIC_CANDIDATES {
            if cache.supports(candidate) {
                flags.push((*candidate).to_string());
            }
        }
    } else {
        tracing::debug!(
            "compiler family `{}` not recognized, skipping diagnostic flags",
            family
        );
    }

    Ok(flags)
}

/// Select the language standard flag, preferring the newest supported.
fn standard_flag(
    cache: &mut CapabilityCache,
) -> Result<&'static str, UnsupportedCompilerError> {
    for candidate in STANDARD_CANDIDATES {
        if cache.supports(candidate) {
            return Ok(candidate);
        }
    }

    Err(UnsupportedCompilerError)
}
