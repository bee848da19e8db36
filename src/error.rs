//! Error types
//!
//! The screen buffer and parser are infallible by design: garbage input is
//! absorbed and out-of-range targets are clamped, never propagated. The
//! only fallible surface is configuration loading.

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::Invalid {
            reason: "rows must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: rows must be positive"
        );
    }
}
