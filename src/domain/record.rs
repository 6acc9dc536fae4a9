//! Typed records emitted by successful ledger operations.
//!
//! Field sets are part of the external interface: front-ends decode these
//! records, so renaming or dropping a field is a breaking change. On the wire
//! each record is a JSON object tagged by `"event"` with camelCase fields.
//! Amounts are decimal strings.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::id::{MarketId, QuestionId};
use super::money::{decimal, Amount, Timestamp};
use super::outcome::{Outcome, Side};

/// Emitted by the factory when a market is deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCreated {
    pub market: MarketId,
    pub creator: Address,
    pub resolver: Address,
    pub fee_recipient: Address,
    pub question_id: QuestionId,
    pub question: String,
    pub close_time: Timestamp,
}

/// Emitted when a trader stakes on a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staked {
    pub trader: Address,
    pub side: Side,
    #[serde(with = "decimal")]
    pub gross_amount: Amount,
    #[serde(with = "decimal")]
    pub fee: Amount,
    #[serde(with = "decimal")]
    pub net_amount: Amount,
}

/// Emitted once, when the resolver sets the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolved {
    pub outcome: Outcome,
}

/// Emitted when the fee recipient sweeps accrued fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeesWithdrawn {
    pub recipient: Address,
    #[serde(with = "decimal")]
    pub amount: Amount,
}

/// Emitted when a winner claims their payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redeemed {
    pub trader: Address,
    #[serde(with = "decimal")]
    pub payout: Amount,
}

/// Any record a factory or market can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Record {
    MarketCreated(MarketCreated),
    Staked(Staked),
    Resolved(Resolved),
    FeesWithdrawn(FeesWithdrawn),
    Redeemed(Redeemed),
}

impl Record {
    /// Stable record name, identical to the `"event"` tag.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MarketCreated(_) => "MarketCreated",
            Self::Staked(_) => "Staked",
            Self::Resolved(_) => "Resolved",
            Self::FeesWithdrawn(_) => "FeesWithdrawn",
            Self::Redeemed(_) => "Redeemed",
        }
    }
}

impl From<MarketCreated> for Record {
    fn from(record: MarketCreated) -> Self {
        Self::MarketCreated(record)
    }
}

impl From<Staked> for Record {
    fn from(record: Staked) -> Self {
        Self::Staked(record)
    }
}

impl From<Resolved> for Record {
    fn from(record: Resolved) -> Self {
        Self::Resolved(record)
    }
}

impl From<FeesWithdrawn> for Record {
    fn from(record: FeesWithdrawn) -> Self {
        Self::FeesWithdrawn(record)
    }
}

impl From<Redeemed> for Record {
    fn from(record: Redeemed) -> Self {
        Self::Redeemed(record)
    }
}
