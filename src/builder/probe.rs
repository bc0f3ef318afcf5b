//! Compiler capability probing.
//!
//! A probe answers one question: does the active compiler accept this
//! flag? The answer comes from attempting a trivial compilation with the
//! candidate flag appended. The probe is deliberately conservative: any
//! failure at all (unsupported flag, missing compiler, io error) counts
//! as "unsupported" and is never escalated. Optional flags that probe
//! false are simply not applied.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::util::process::ProcessBuilder;

/// A minimal, always-valid translation unit.
const PROBE_SOURCE: &str = "int main (int argc, char **argv) { return 0; }\n";

/// Capability query over a single compiler.
///
/// Behind a trait so tests (and the profile logic they exercise) can
/// substitute a fake compiler instead of spawning real processes.
pub trait FlagProbe {
    /// Does the compiler accept this flag?
    fn supports(&self, flag: &str) -> bool;
}

/// Probes by attempting a real compilation.
#[derive(Debug, Clone)]
pub struct CompileProbe {
    compiler: PathBuf,
}

impl CompileProbe {
    /// Create a probe for the given compiler driver.
    pub fn new(compiler: impl Into<PathBuf>) -> Self {
        CompileProbe {
            compiler: compiler.into(),
        }
    }

    /// Compile the probe source with the candidate flag.
    ///
    /// The temp directory (source and object file) is removed when the
    /// guard drops, on every exit path including spawn failure.
    fn try_compile(&self, flag: &str) -> anyhow::Result<bool> {
        let dir = tempfile::tempdir()?;
        let source = dir.path().join("probe.cc");
        let object = dir.path().join("probe.o");

        std::fs::write(&source, PROBE_SOURCE)?;

        let output = ProcessBuilder::new(&self.compiler)
            .arg("-c")
            .arg(&source)
            .arg("-o")
            .arg(&object)
            .arg(flag)
            .exec()?;

        Ok(output.status.success())
    }
}

impl FlagProbe for CompileProbe {
    fn supports(&self, flag: &str) -> bool {
        match self.try_compile(flag) {
            Ok(supported) => supported,
            Err(e) => {
                tracing::debug!("probe for `{}` failed to run: {}", flag, e);
                false
            }
        }
    }
}

/// Per-run cache of probe results.
///
/// One orchestration run owns one cache; nothing is memoized across runs
/// or processes, which keeps repeated runs deterministic and the profile
/// logic testable.
pub struct CapabilityCache {
    probe: Box<dyn FlagProbe>,
    results: HashMap<String, bool>,
}

impl CapabilityCache {
    /// Create a cache over a probe.
    pub fn new(probe: Box<dyn FlagProbe>) -> Self {
        CapabilityCache {
            probe,
            results: HashMap::new(),
        }
    }

    /// Query a flag, probing at most once per flag per run.
    pub fn supports(&mut self, flag: &str) -> bool {
        if let Some(&cached) = self.results.get(flag) {
            return cached;
        }

        let supported = self.probe.supports(flag);
        tracing::debug!(
            "probe `{}`: {}",
            flag,
            if supported { "supported" } else { "not applied" }
        );
        self.results.insert(flag.to_string(), supported);
        supported
    }

    /// Number of distinct flags probed so far.
    pub fn probed_count(&self) -> usize {
        self.results.len()
    }
}
