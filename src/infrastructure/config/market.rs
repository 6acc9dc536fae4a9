//! Market factory configuration.

use serde::Deserialize;

use crate::application::{FactorySettings, FeeRecipientPolicy};
use crate::domain::{FeePolicy, DEFAULT_FEE_BPS};
use crate::error::{ConfigError, Result};

/// Highest configurable fee rate, in basis points (10%).
pub const MAX_FEE_BPS: u16 = 1_000;

/// Settings applied to every market the factory creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarketSettings {
    /// Fee charged on each stake, in basis points.
    pub fee_bps: u16,
    /// `"owner"`, `"creator"` or a fixed `0x` address.
    pub fee_recipient: FeeRecipientPolicy,
}

impl MarketSettings {
    /// Convert to the settings the factory consumes.
    #[must_use]
    pub fn factory_settings(&self) -> FactorySettings {
        FactorySettings {
            fee_policy: FeePolicy::new(self.fee_bps),
            fee_recipient: self.fee_recipient,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.fee_bps > MAX_FEE_BPS {
            return Err(ConfigError::InvalidValue {
                field: "fee_bps",
                reason: format!("must be at most {MAX_FEE_BPS}, got {}", self.fee_bps),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            fee_bps: DEFAULT_FEE_BPS,
            fee_recipient: FeeRecipientPolicy::default(),
        }
    }
}
