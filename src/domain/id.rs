//! Domain identifier types with proper encapsulation.
//!
//! Participants, resolvers, fee recipients and the factory owner are all plain
//! account addresses. Markets are addressed the same way: a market's identifier
//! is also the escrow account that holds its funds.

use std::fmt;

use alloy_primitives::{keccak256, Address, B256};
use serde::{Deserialize, Serialize};

/// Market identifier - newtype over the market's escrow address.
///
/// The inner address is private so identifiers can only be produced by
/// [`MarketId::derive`] (or parsed back from an address the factory handed out).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketId(Address);

impl MarketId {
    /// Derive the identifier of the `index`-th market deployed by `factory`.
    ///
    /// Follows contract CREATE address derivation; the deployment nonce starts
    /// at 1, so market `0` uses nonce `1`.
    #[must_use]
    pub fn derive(factory: &Address, index: u64) -> Self {
        Self(factory.create(index + 1))
    }

    /// Wrap an address previously returned by the factory.
    #[must_use]
    pub const fn from_address(address: Address) -> Self {
        Self(address)
    }

    /// The escrow account holding this market's funds.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.0
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MarketId> for Address {
    fn from(id: MarketId) -> Self {
        id.0
    }
}

/// Content-derived question identifier: `keccak256(question)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(B256);

impl QuestionId {
    /// Hash the question text. The same text always yields the same id.
    #[must_use]
    pub fn from_question(question: &str) -> Self {
        Self(keccak256(question.as_bytes()))
    }

    /// Get the raw 32-byte hash.
    #[must_use]
    pub const fn as_b256(&self) -> &B256 {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
