//! Engine configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a development checkout runs with no setup at all.

use serde::{Deserialize, Serialize};
use std::env;

/// Wholesale engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// SQLite database path
    pub database_path: String,

    /// Redis connection string (optional). When unset, cache invalidation
    /// and notifications become no-ops.
    pub redis_url: Option<String>,

    /// Default ISO currency code for sellers without a configured program
    pub currency: String,

    /// How many order numbers to try before giving up on a placement that
    /// keeps colliding on the unique order-number constraint
    pub order_number_attempts: u32,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = EngineConfig {
            database_path: env::var("WHOLESALE_DB_PATH")
                .unwrap_or_else(|_| "./data/wholesale.db".to_string()),

            redis_url: env::var("REDIS_URL").ok(),

            currency: env::var("WHOLESALE_CURRENCY")
                .unwrap_or_else(|_| vesta_core::DEFAULT_CURRENCY.to_string()),

            order_number_attempts: env::var("WHOLESALE_ORDER_NUMBER_ATTEMPTS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("WHOLESALE_ORDER_NUMBER_ATTEMPTS".to_string())
                })?,
        };

        if config.order_number_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "WHOLESALE_ORDER_NUMBER_ATTEMPTS".to_string(),
            ));
        }

        Ok(config)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            database_path: "./data/wholesale.db".to_string(),
            redis_url: None,
            currency: vesta_core::DEFAULT_CURRENCY.to_string(),
            order_number_attempts: 3,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.database_path, "./data/wholesale.db");
        assert_eq!(config.redis_url, None);
        assert_eq!(config.currency, "USD");
        assert_eq!(config.order_number_attempts, 3);
    }

    #[test]
    fn test_load_env_round_trip() {
        // Env mutation is process-global; keep the whole sequence in one
        // test to avoid racing parallel tests.
        env::remove_var("WHOLESALE_ORDER_NUMBER_ATTEMPTS");
        let config = EngineConfig::load().unwrap();
        assert_eq!(config.order_number_attempts, 3);

        env::set_var("WHOLESALE_ORDER_NUMBER_ATTEMPTS", "5");
        let config = EngineConfig::load().unwrap();
        assert_eq!(config.order_number_attempts, 5);

        env::set_var("WHOLESALE_ORDER_NUMBER_ATTEMPTS", "not-a-number");
        assert!(matches!(
            EngineConfig::load(),
            Err(ConfigError::InvalidValue(_))
        ));

        env::set_var("WHOLESALE_ORDER_NUMBER_ATTEMPTS", "0");
        assert!(matches!(
            EngineConfig::load(),
            Err(ConfigError::InvalidValue(_))
        ));

        env::remove_var("WHOLESALE_ORDER_NUMBER_ATTEMPTS");
    }
}
