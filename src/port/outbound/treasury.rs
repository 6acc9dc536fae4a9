//! Treasury port: custody of funds.
//!
//! A treasury keeps a balance per account and moves value between accounts.
//! Each market's identifier is its escrow account, so the market's ledger
//! balance is `treasury.balance_of(&market_id.address())`.

use alloy_primitives::Address;

use crate::domain::{Amount, TransferError};

/// Custodian of account balances.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - A transfer is atomic: either both balances change or neither does
/// - A transfer may call back into arbitrary code (for example a recipient
///   hook); markets guard against nested re-entry themselves
pub trait Treasury: Send + Sync {
    /// Current balance of `account`.
    fn balance_of(&self, account: &Address) -> Amount;

    /// Move `amount` from `from` to `to`.
    fn transfer(&self, from: Address, to: Address, amount: Amount) -> Result<(), TransferError>;
}
