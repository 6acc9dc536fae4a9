//! Ledger errors.
//!
//! Every rejected operation maps onto one of four kinds:
//!
//! - [`ErrorKind::Unauthorized`] - the caller lacks the required role
//! - [`ErrorKind::InvalidState`] - the operation is not allowed in the market's current stage
//! - [`ErrorKind::InvalidArgument`] - an input is out of range
//! - [`ErrorKind::InvariantViolation`] - the escrow holds less than the books owe (a defect)
//!
//! Failures raised by the treasury while moving funds surface as
//! [`ErrorKind::Transfer`]. In every case the rejected operation leaves no trace
//! in pools, stakes, fees or outcome.
//!
//! # Examples
//!
//! ```
//! use consensus_market::domain::error::{ErrorKind, LedgerError, StateViolation};
//!
//! let err = LedgerError::InvalidState(StateViolation::AlreadyClaimed);
//! assert_eq!(err.kind(), ErrorKind::InvalidState);
//! ```

use std::fmt;

use alloy_primitives::Address;
use thiserror::Error;

use super::money::{Amount, Timestamp};

/// Role a caller must hold for a guarded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    ApprovedCreator,
    Resolver,
    FeeRecipient,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Owner => "registry owner",
            Self::ApprovedCreator => "approved creator",
            Self::Resolver => "resolver",
            Self::FeeRecipient => "fee recipient",
        })
    }
}

/// Broad classification of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    InvalidState,
    InvalidArgument,
    InvariantViolation,
    Transfer,
}

/// Lifecycle-stage violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateViolation {
    #[error("staking closed at {close_time}")]
    StakingClosed { close_time: Timestamp },

    #[error("market is already resolved")]
    AlreadyResolved,

    #[error("market cannot be resolved before {close_time} (now {now})")]
    NotClosed { close_time: Timestamp, now: Timestamp },

    #[error("market is not resolved yet")]
    NotResolved,

    #[error("winnings already claimed")]
    AlreadyClaimed,

    #[error("no fees accrued")]
    NoFeesAccrued,

    #[error("reentrant call rejected")]
    Reentrant,
}

/// Out-of-range inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentViolation {
    #[error("stake amount must be positive")]
    ZeroAmount,

    #[error("stake of {amount} overflows the pool")]
    AmountOverflow { amount: Amount },

    #[error("close time {close_time} is not after now ({now})")]
    CloseTimeNotInFuture { close_time: Timestamp, now: Timestamp },

    #[error("market index {index} out of range (count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("outcome must be yes or no")]
    UnresolvedOutcome,

    #[error("nothing to redeem")]
    NothingToRedeem,
}

/// Failures raised by a treasury while moving funds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("insufficient funds in {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: Address,
        balance: Amount,
        requested: Amount,
    },

    #[error("transfer to {account} rejected: {reason}")]
    Rejected { account: Address, reason: String },

    #[error("balance of {account} would overflow")]
    Overflow { account: Address },
}

/// Errors returned by factory and market operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("{caller} is not the {role}")]
    Unauthorized { role: Role, caller: Address },

    #[error("invalid state: {0}")]
    InvalidState(StateViolation),

    #[error("invalid argument: {0}")]
    InvalidArgument(ArgumentViolation),

    #[error("ledger invariant violated: escrow holds {actual}, books expect {expected}")]
    InvariantViolation { expected: Amount, actual: Amount },

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl LedgerError {
    #[must_use]
    pub fn unauthorized(role: Role, caller: Address) -> Self {
        Self::Unauthorized { role, caller }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::InvariantViolation { .. } => ErrorKind::InvariantViolation,
            Self::Transfer(_) => ErrorKind::Transfer,
        }
    }
}

impl From<StateViolation> for LedgerError {
    fn from(violation: StateViolation) -> Self {
        Self::InvalidState(violation)
    }
}

impl From<ArgumentViolation> for LedgerError {
    fn from(violation: ArgumentViolation) -> Self {
        Self::InvalidArgument(violation)
    }
}
