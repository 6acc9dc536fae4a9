//! In-memory treasury.

use std::collections::HashMap;

use alloy_primitives::Address;
use parking_lot::Mutex;
use tracing::debug;

use crate::domain::{Amount, TransferError};
use crate::port::Treasury;

/// Account balances held in process memory.
///
/// All balances live behind a single lock, so a transfer updates both sides
/// atomically. The lock is released before the call returns; implementations
/// that wrap this one may run arbitrary code around the transfer.
#[derive(Debug, Default)]
pub struct InMemoryTreasury {
    balances: Mutex<HashMap<Address, Amount>>,
}

impl InMemoryTreasury {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit newly issued funds to `account`.
    pub fn mint(&self, account: Address, amount: Amount) -> Result<(), TransferError> {
        let mut balances = self.balances.lock();
        let balance = balances.entry(account).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(TransferError::Overflow { account })?;
        debug!(%account, amount = %amount, "Minted");
        Ok(())
    }

    /// Sum of every balance.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.balances
            .lock()
            .values()
            .fold(0, |acc, balance| acc.saturating_add(*balance))
    }
}

impl Treasury for InMemoryTreasury {
    fn balance_of(&self, account: &Address) -> Amount {
        self.balances.lock().get(account).copied().unwrap_or_default()
    }

    fn transfer(&self, from: Address, to: Address, amount: Amount) -> Result<(), TransferError> {
        let mut balances = self.balances.lock();
        let source = balances.get(&from).copied().unwrap_or_default();
        if source < amount {
            return Err(TransferError::InsufficientFunds {
                account: from,
                balance: source,
                requested: amount,
            });
        }
        if from == to {
            return Ok(());
        }
        let target = balances.get(&to).copied().unwrap_or_default();
        let credited = target
            .checked_add(amount)
            .ok_or(TransferError::Overflow { account: to })?;

        balances.insert(from, source - amount);
        balances.insert(to, credited);
        debug!(%from, %to, amount = %amount, "Transferred");
        Ok(())
    }
}
