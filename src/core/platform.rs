//! Host platform identification.
//!
//! The orchestrator recognizes exactly two platform classes. Anything else
//! is a hard configuration error: there is no default link policy to fall
//! back on, and guessing one would produce a module the loader cannot
//! resolve at runtime.

use thiserror::Error;

/// A platform outside the recognized classes.
#[derive(Debug, Clone, Error)]
#[error("unsupported platform: {token}\nhelp: only macOS and Linux hosts can link the extension module")]
pub struct UnsupportedPlatformError {
    /// The token that failed to parse.
    pub token: String,
}

/// Recognized host operating systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    /// macOS / Darwin.
    MacOs,
    /// Linux.
    Linux,
}

impl HostOs {
    /// Identify the host this process is running on.
    pub fn host() -> Result<Self, UnsupportedPlatformError> {
        Self::from_token(std::env::consts::OS)
    }

    /// Parse a platform token (as reported by the environment).
    pub fn from_token(token: &str) -> Result<Self, UnsupportedPlatformError> {
        match token {
            "macos" | "darwin" => Ok(HostOs::MacOs),
            "linux" => Ok(HostOs::Linux),
            other => Err(UnsupportedPlatformError {
                token: other.to_string(),
            }),
        }
    }

    /// Get the platform name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            HostOs::MacOs => "macos",
            HostOs::Linux => "linux",
        }
    }
}

impl std::fmt::Display for HostOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_tokens() {
        assert_eq!(HostOs::from_token("macos").unwrap(), HostOs::MacOs);
        assert_eq!(HostOs::from_token("darwin").unwrap(), HostOs::MacOs);
        assert_eq!(HostOs::from_token("linux").unwrap(), HostOs::Linux);
    }

    #[test]
    fn test_unrecognized_token_is_fatal() {
        for token in ["windows", "freebsd", "wasi", ""] {
            let err = HostOs::from_token(token).unwrap_err();
            assert_eq!(err.token, token);
            assert!(err.to_string().contains("unsupported platform"));
        }
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(HostOs::from_token(&HostOs::Linux.to_string()).unwrap(), HostOs::Linux);
        assert_eq!(HostOs::from_token(&HostOs::MacOs.to_string()).unwrap(), HostOs::MacOs);
    }
}
