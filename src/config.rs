//! Terminal core configuration
//!
//! Hosts hand a [`TerminalConfig`] to [`crate::emulator::TerminalEmulator`]
//! at construction. Loadable from TOML so an embedding application can keep
//! it in its own config file under a `[terminal]` table.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::screen::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_SCROLLBACK};

/// Initial size and scrollback limits for a terminal session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    /// Maximum retained scrollback lines.
    #[serde(default = "default_scrollback")]
    pub scrollback_lines: usize,
}

fn default_rows() -> usize {
    DEFAULT_ROWS
}

fn default_cols() -> usize {
    DEFAULT_COLS
}

fn default_scrollback() -> usize {
    DEFAULT_SCROLLBACK
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            scrollback_lines: default_scrollback(),
        }
    }
}

impl TerminalConfig {
    /// Parse from a TOML document.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::Invalid {
                reason: format!("terminal size must be at least 1x1, got {}x{}", self.rows, self.cols),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TerminalConfig::default();
        assert_eq!(config.rows, 24);
        assert_eq!(config.cols, 80);
        assert_eq!(config.scrollback_lines, 10_000);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = TerminalConfig::from_toml_str("rows = 40").unwrap();
        assert_eq!(config.rows, 40);
        assert_eq!(config.cols, 80);
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = TerminalConfig::from_toml_str("rows = 0").unwrap_err();
        assert!(err.to_string().contains("at least 1x1"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(TerminalConfig::from_toml_str("rows = ").is_err());
    }
}
