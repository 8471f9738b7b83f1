//! Configuration management for the FoodLoop server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FOODLOOP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Proximity notification configuration
    pub notifications: NotificationConfig,

    /// Demo data configuration
    pub demo: DemoConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationConfig {
    /// Radius in km for organizations that have not set one
    pub default_radius_km: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DemoConfig {
    /// Insert the sample organizations and suppliers at startup
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FOODLOOP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("notifications.default_radius_km", shared::DEFAULT_MAX_RADIUS_KM)?
            .set_default("demo.seed_demo_data", true)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FOODLOOP_ prefix)
            .add_source(
                Environment::with_prefix("FOODLOOP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), AppError> {
        shared::validate_radius(self.notifications.default_radius_km).map_err(|msg| {
            AppError::Configuration(format!("notifications.default_radius_km: {}", msg))
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            notifications: NotificationConfig::default(),
            demo: DemoConfig { seed_demo_data: true },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_radius_km: shared::DEFAULT_MAX_RADIUS_KM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.notifications.default_radius_km, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_positive_default_radius_rejected() {
        let mut config = Config::default();
        config.notifications.default_radius_km = 0.0;
        assert!(matches!(config.validate(), Err(AppError::Configuration(_))));
    }
}
