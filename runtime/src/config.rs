//! Store configuration.
//!
//! Defaults work for most stores; [`StoreConfig::from_env`] lets a binary
//! override them without code changes.
//!
//! | Variable                  | Field               |
//! |---------------------------|---------------------|
//! | `STORE_NAME`              | `name`              |
//! | `STORE_DEVTOOLS`          | `devtools_enabled`  |
//! | `STORE_DEVTOOLS_CAPACITY` | `devtools_capacity` |
//! | `STORE_MAX_EFFECT_DEPTH`  | `max_effect_depth`  |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("Invalid value for {variable}: {value:?}")]
    InvalidValue {
        /// Name of the variable
        variable: String,
        /// The raw value that failed to parse
        value: String,
    },
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use entity_store_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_name("todo")
///     .with_devtools_capacity(Some(100));
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.name, "todo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name shown in logs and devtools exports
    pub name: String,
    /// Record a devtools entry for every accepted action
    pub devtools_enabled: bool,
    /// Maximum number of devtools entries kept, `None` for unbounded
    pub devtools_capacity: Option<usize>,
    /// How many levels of effect-dispatched actions may nest below the
    /// action passed to `send`
    pub max_effect_depth: usize,
}

impl StoreConfig {
    /// Set the store name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enable or disable devtools recording
    #[must_use]
    pub const fn with_devtools(mut self, enabled: bool) -> Self {
        self.devtools_enabled = enabled;
        self
    }

    /// Bound the devtools log
    #[must_use]
    pub const fn with_devtools_capacity(mut self, capacity: Option<usize>) -> Self {
        self.devtools_capacity = capacity;
        self
    }

    /// Set the maximum effect depth
    #[must_use]
    pub const fn with_max_effect_depth(mut self, depth: usize) -> Self {
        self.max_effect_depth = depth;
        self
    }

    /// Load configuration from process environment variables
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable cannot be parsed or the result
    /// fails [`StoreConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|variable| std::env::var(variable).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`StoreConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("STORE_NAME") {
            config.name = name;
        }
        if let Some(value) = lookup("STORE_DEVTOOLS") {
            config.devtools_enabled = parse_flag("STORE_DEVTOOLS", &value)?;
        }
        if let Some(value) = lookup("STORE_DEVTOOLS_CAPACITY") {
            config.devtools_capacity = Some(parse_number("STORE_DEVTOOLS_CAPACITY", &value)?);
        }
        if let Some(value) = lookup("STORE_MAX_EFFECT_DEPTH") {
            config.max_effect_depth = parse_number("STORE_MAX_EFFECT_DEPTH", &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for a zero effect depth or a zero
    /// devtools capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_effect_depth == 0 {
            return Err(ConfigError::Validation(
                "max_effect_depth must be at least 1".to_string(),
            ));
        }
        if self.devtools_capacity == Some(0) {
            return Err(ConfigError::Validation(
                "devtools_capacity must be positive (use None for unbounded)".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "store".to_string(),
            devtools_enabled: true,
            devtools_capacity: None,
            max_effect_depth: 16,
        }
    }
}

fn parse_flag(variable: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(invalid(variable, value)),
    }
}

fn parse_number(variable: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| invalid(variable, value))
}

fn invalid(variable: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        variable: variable.to_string(),
        value: value.to_string(),
    }
}
