//! Core library configuration artifact.
//!
//! The core library's own build step writes a small JSON description of
//! what it produced. This side of the fence only ever reads it: the file
//! is the single source of truth for the core's version and the libraries
//! an extension module must link.

use std::path::PathBuf;

use semver::Version;
use serde::{Deserialize, Serialize};

/// Configuration reported by the core library build.
///
/// `version` and `libraries` are required; a config file missing either is
/// rejected during deserialization rather than defaulted, since linking
/// against a half-described core produces artifacts that fail at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Version the core library reports for itself
    pub version: Version,

    /// Libraries to link, in link order, without platform prefix/suffix
    pub libraries: Vec<String>,

    /// Optional extra include directories shipped with the core
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: CoreConfig = serde_json::from_str(
            r#"{
                "version": "1.2.0",
                "libraries": ["adccore", "tensorlight"],
                "include_dirs": ["extension/core/include/extra"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.version, Version::new(1, 2, 0));
        assert_eq!(config.libraries, vec!["adccore", "tensorlight"]);
        assert_eq!(config.include_dirs.len(), 1);
    }

    #[test]
    fn test_include_dirs_are_optional() {
        let config: CoreConfig =
            serde_json::from_str(r#"{"version": "0.3.1", "libraries": ["adccore"]}"#).unwrap();
        assert!(config.include_dirs.is_empty());
    }

    #[test]
    fn test_missing_version_is_rejected() {
        let result: Result<CoreConfig, _> =
            serde_json::from_str(r#"{"libraries": ["adccore"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_libraries_is_rejected() {
        let result: Result<CoreConfig, _> = serde_json::from_str(r#"{"version": "1.0.0"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_library_order_is_preserved() {
        let config: CoreConfig = serde_json::from_str(
            r#"{"version": "1.0.0", "libraries": ["z", "a", "m"]}"#,
        )
        .unwrap();
        assert_eq!(config.libraries, vec!["z", "a", "m"]);
    }
}
