//! Builders for domain primitives used across tests.

use alloy_primitives::Address;

use crate::domain::Amount;

/// One wei-denominated milli-ether.
pub const MILLI: Amount = 1_000_000_000_000_000;

/// One ether in its smallest unit.
pub const ETHER: Amount = 1_000 * MILLI;

/// Address whose last byte is `n` and every other byte zero.
pub fn addr(n: u8) -> Address {
    Address::with_last_byte(n)
}

/// `n` distinct trader addresses starting at `0x..10`.
pub fn traders(n: u8) -> Vec<Address> {
    (0..n).map(|i| addr(0x10 + i)).collect()
}

/// `n` whole ether.
pub const fn ether(n: u128) -> Amount {
    n * ETHER
}

/// `n` milli-ether.
pub const fn milli(n: u128) -> Amount {
    n * MILLI
}
