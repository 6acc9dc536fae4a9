//! Protocol fee policy.
//!
//! A fixed basis-point rate is taken off every gross stake:
//!
//! ```text
//! fee = floor(gross * bps / 10_000)
//! net = gross - fee
//! ```

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::money::{Amount, BPS_DENOMINATOR};

/// Default protocol fee: 50 bps (0.5%).
pub const DEFAULT_FEE_BPS: u16 = 50;

/// A gross stake broken into its fee and net parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    pub gross: Amount,
    pub fee: Amount,
    pub net: Amount,
}

/// Fee policy with a fixed basis-point rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePolicy {
    bps: u16,
}

impl FeePolicy {
    /// Create a policy charging `bps` basis points.
    ///
    /// Rates above 100% are clamped to 100%.
    #[must_use]
    pub fn new(bps: u16) -> Self {
        Self {
            bps: bps.min(BPS_DENOMINATOR),
        }
    }

    #[must_use]
    pub const fn bps(&self) -> u16 {
        self.bps
    }

    /// Split a gross amount into fee and net.
    #[must_use]
    pub fn split(&self, gross: Amount) -> FeeSplit {
        let product = U256::from(gross) * U256::from(self.bps);
        let fee_wide = product / U256::from(BPS_DENOMINATOR);
        // fee <= gross because bps <= 10_000
        let fee = fee_wide.to::<u128>();
        FeeSplit {
            gross,
            fee,
            net: gross - fee,
        }
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FEE_BPS)
    }
}
