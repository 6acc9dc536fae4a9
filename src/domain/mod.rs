//! Custody-agnostic settlement logic.
//!
//! Pure types and transitions: identifiers, amounts, the fee policy, the
//! redemption calculator and the [`Market`] state machine. Nothing here talks
//! to a clock, a treasury or a lock.

pub mod error;
pub mod fee;
pub mod id;
pub mod market;
pub mod money;
pub mod outcome;
pub mod record;
pub mod redemption;

pub use alloy_primitives::Address;

pub use error::{ArgumentViolation, ErrorKind, LedgerError, Role, StateViolation, TransferError};
pub use fee::{FeePolicy, FeeSplit, DEFAULT_FEE_BPS};
pub use id::{MarketId, QuestionId};
pub use market::{Market, MarketSnapshot, MarketTerms, Stake};
pub use money::{Amount, Timestamp, BPS_DENOMINATOR};
pub use outcome::{Outcome, Side};
pub use record::{FeesWithdrawn, MarketCreated, Record, Redeemed, Resolved, Staked};
