//! Configuration error types.
//!
//! Gameplay failures (a destroyed hull, an empty wallet) are phase-machine
//! outcomes, not errors.  The only fallible surface of the crate is loading
//! and validating [`GameConfig`](crate::config::GameConfig).

use std::fmt;

/// Top-level error enum for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// `assets/game.toml` (or the string handed to
    /// [`GameConfig::from_toml_str`](crate::config::GameConfig::from_toml_str))
    /// is not valid TOML for the config schema.
    Parse(toml::de::Error),

    /// A tunable is outside the range the simulation can cope with.
    UnsafeConstant {
        /// Dotted name of the setting (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid game config: {}", e),
            ConfigError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "setting '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::UnsafeConstant { .. } => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Convenience alias: a `Result` using `ConfigError` as the error type.
pub type ConfigResult<T> = Result<T, ConfigError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is a probability in `[0, 1]`.
pub fn validate_probability(name: &'static str, value: f64) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, 1.0]",
        })
    }
}

/// Returns an error unless `value` is strictly positive.
pub fn validate_positive(name: &'static str, value: f64) -> ConfigResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is zero or positive.
pub fn validate_non_negative(name: &'static str, value: f64) -> ConfigResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}
