//! Application configuration.
//!
//! Defaults cover every setting; environment variables override them.

use basket_runtime::StoreConfig;
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive
pub const LOG_ENV: &str = "SHOPPING_LIST_LOG";

/// Environment variable holding the action broadcast capacity
pub const BROADCAST_CAPACITY_ENV: &str = "SHOPPING_LIST_BROADCAST_CAPACITY";

/// Environment variable holding the action timeout in milliseconds
pub const ACTION_TIMEOUT_ENV: &str = "SHOPPING_LIST_ACTION_TIMEOUT_MS";

/// A configuration value that could not be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The variable is set but is not a number
    #[error("{key} must be a positive integer, got {value:?}")]
    NotANumber {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },

    /// The variable is set to zero
    #[error("{key} must be greater than zero")]
    Zero {
        /// Variable name
        key: &'static str,
    },

    /// The log filter is not a valid tracing directive
    #[error("SHOPPING_LIST_LOG is not a valid filter ({value:?}): {reason}")]
    InvalidLogFilter {
        /// Raw value
        value: String,
        /// Parser message
        reason: String,
    },
}

/// Shopping-list application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Tracing filter directive.
    ///
    /// Default: `shopping_list=info,basket_runtime=warn`
    pub log_filter: String,

    /// Number of container changes buffered per observer.
    ///
    /// Default: 64
    pub broadcast_capacity: usize,

    /// How long an action hook waits for the store to report an outcome.
    ///
    /// Default: 1 second
    pub action_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the log filter does not parse or a numeric
    /// variable is malformed or zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the log filter does not parse or a numeric
    /// variable is malformed or zero.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(filter) = lookup(LOG_ENV) {
            if let Err(error) = EnvFilter::try_new(&filter) {
                return Err(ConfigError::InvalidLogFilter {
                    value: filter,
                    reason: error.to_string(),
                });
            }
            config.log_filter = filter;
        }
        if let Some(value) = lookup(BROADCAST_CAPACITY_ENV) {
            config.broadcast_capacity = parse_positive(BROADCAST_CAPACITY_ENV, &value)?;
        }
        if let Some(value) = lookup(ACTION_TIMEOUT_ENV) {
            let millis = parse_positive(ACTION_TIMEOUT_ENV, &value)?;
            let millis = u64::try_from(millis).unwrap_or(u64::MAX);
            config.action_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Set the tracing filter directive.
    ///
    /// The directive is checked when the filter is built, see
    /// [`AppConfig::env_filter`].
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Set the broadcast capacity.
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Set the action timeout.
    #[must_use]
    pub const fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }

    /// Tracing filter built from [`AppConfig::log_filter`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogFilter`] if the directive does not parse.
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_filter).map_err(|error| ConfigError::InvalidLogFilter {
            value: self.log_filter.clone(),
            reason: error.to_string(),
        })
    }

    /// Store configuration derived from these settings.
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .with_broadcast_capacity(self.broadcast_capacity)
            .with_action_timeout(self.action_timeout)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "shopping_list=info,basket_runtime=warn".to_string(),
            broadcast_capacity: 64,
            action_timeout: Duration::from_secs(1),
        }
    }
}

impl From<&AppConfig> for StoreConfig {
    fn from(config: &AppConfig) -> Self {
        config.store_config()
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::Zero { key }),
        Ok(n) => Ok(n),
        Err(_) => Err(ConfigError::NotANumber {
            key,
            value: value.to_string(),
        }),
    }
}
