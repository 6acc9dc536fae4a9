//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Every
//! section is optional; missing values fall back to their defaults.
//!
//! ```toml
//! [market]
//! fee_bps = 50
//! fee_recipient = "owner"
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use consensus_market::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     if !config.init_logging() {
//!         eprintln!("tracing subscriber already installed");
//!     }
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::market::MarketSettings;
use crate::application::FactorySettings;
use crate::error::{ConfigError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub market: MarketSettings,
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        self.market.validate()?;
        self.logging.validate()
    }

    /// Settings for a [`MarketFactory`](crate::application::MarketFactory).
    #[must_use]
    pub fn factory_settings(&self) -> FactorySettings {
        self.market.factory_settings()
    }

    /// Install the global tracing subscriber.
    ///
    /// Returns `false` if a subscriber was already installed.
    #[must_use]
    pub fn init_logging(&self) -> bool {
        self.logging.init()
    }
}
