//! Market factory: creator allowlist and market registry.
//!
//! The factory is created once with an owner. The owner curates which
//! identities may open markets; approved creators deploy new
//! [`PredictionMarket`]s, which are appended to an ordered registry and never
//! removed. Markets keep no reference back to the factory.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::Address;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{info, warn};

use super::market::{LedgerContext, PredictionMarket};
use crate::domain::{
    ArgumentViolation, FeePolicy, LedgerError, MarketCreated, MarketId, MarketTerms, Record, Role,
    Timestamp,
};
use crate::port::Event;

/// Who collects the fees of newly created markets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum FeeRecipientPolicy {
    /// The factory owner.
    #[default]
    Owner,
    /// Whoever created the market.
    Creator,
    /// A fixed account.
    Fixed(Address),
}

impl FeeRecipientPolicy {
    /// Resolve the policy for a market opened by `creator`.
    #[must_use]
    pub fn recipient(&self, owner: Address, creator: Address) -> Address {
        match self {
            Self::Owner => owner,
            Self::Creator => creator,
            Self::Fixed(address) => *address,
        }
    }
}

impl FromStr for FeeRecipientPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "owner" => Ok(Self::Owner),
            "creator" => Ok(Self::Creator),
            other => Address::from_str(other)
                .map(Self::Fixed)
                .map_err(|_| format!("expected \"owner\", \"creator\" or an address, got {other:?}")),
        }
    }
}

impl TryFrom<String> for FeeRecipientPolicy {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for FeeRecipientPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => f.write_str("owner"),
            Self::Creator => f.write_str("creator"),
            Self::Fixed(address) => write!(f, "{address}"),
        }
    }
}

/// Parameters applied to every market the factory creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FactorySettings {
    pub fee_policy: FeePolicy,
    pub fee_recipient: FeeRecipientPolicy,
}

#[derive(Debug, Default)]
struct Registry {
    approved: HashSet<Address>,
    markets: Vec<MarketId>,
}

/// Creator allowlist plus the append-only registry of deployed markets.
pub struct MarketFactory {
    address: Address,
    owner: Address,
    settings: FactorySettings,
    registry: RwLock<Registry>,
    markets: DashMap<MarketId, Arc<PredictionMarket>>,
    journal: RwLock<Vec<Record>>,
    ctx: LedgerContext,
}

impl MarketFactory {
    /// Create a factory owned by `owner`.
    ///
    /// The factory's own address, from which market identifiers are derived,
    /// is the owner's first deployment address.
    #[must_use]
    pub fn new(owner: Address, settings: FactorySettings, ctx: LedgerContext) -> Self {
        Self::with_address(owner.create(0), owner, settings, ctx)
    }

    /// Create a factory with an explicit address.
    #[must_use]
    pub fn with_address(
        address: Address,
        owner: Address,
        settings: FactorySettings,
        ctx: LedgerContext,
    ) -> Self {
        info!(
            factory = %address,
            owner = %owner,
            fee_bps = settings.fee_policy.bps(),
            fee_recipient = %settings.fee_recipient,
            "Market factory initialized"
        );
        Self {
            address,
            owner,
            settings,
            registry: RwLock::new(Registry::default()),
            markets: DashMap::new(),
            journal: RwLock::new(Vec::new()),
            ctx,
        }
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    #[must_use]
    pub fn settings(&self) -> FactorySettings {
        self.settings
    }

    #[must_use]
    pub fn approved_creator(&self, identity: &Address) -> bool {
        self.registry.read().approved.contains(identity)
    }

    /// Grant or revoke market creation rights. Owner only; idempotent.
    pub fn set_approved_creator(
        &self,
        caller: Address,
        creator: Address,
        approved: bool,
    ) -> Result<(), LedgerError> {
        if caller != self.owner {
            warn!(factory = %self.address, caller = %caller, "Approval change rejected");
            return Err(LedgerError::unauthorized(Role::Owner, caller));
        }

        let mut registry = self.registry.write();
        if approved {
            registry.approved.insert(creator);
        } else {
            registry.approved.remove(&creator);
        }
        info!(factory = %self.address, creator = %creator, approved, "Creator approval set");
        Ok(())
    }

    /// Deploy a new market. Approved creators only; `close_time` must lie in
    /// the future.
    pub fn create_market(
        &self,
        caller: Address,
        question: impl Into<String>,
        close_time: Timestamp,
        resolver: Address,
    ) -> Result<MarketCreated, LedgerError> {
        let question = question.into();
        let mut registry = self.registry.write();

        if !registry.approved.contains(&caller) {
            warn!(factory = %self.address, caller = %caller, "Market creation rejected");
            return Err(LedgerError::unauthorized(Role::ApprovedCreator, caller));
        }
        let now = self.ctx.clock.now();
        if close_time <= now {
            warn!(factory = %self.address, close_time, now, "Market creation rejected");
            return Err(ArgumentViolation::CloseTimeNotInFuture { close_time, now }.into());
        }

        let id = MarketId::derive(&self.address, registry.markets.len() as u64);
        let fee_recipient = self.settings.fee_recipient.recipient(self.owner, caller);
        let terms = MarketTerms::new(
            id,
            question,
            close_time,
            resolver,
            fee_recipient,
            self.settings.fee_policy,
        );
        let created = MarketCreated {
            market: id,
            creator: caller,
            resolver,
            fee_recipient,
            question_id: terms.question_id,
            question: terms.question.clone(),
            close_time,
        };

        self.markets
            .insert(id, Arc::new(PredictionMarket::new(terms, self.ctx.clone())));
        registry.markets.push(id);

        let sequence = {
            let mut journal = self.journal.write();
            journal.push(Record::from(created.clone()));
            journal.len() as u64 - 1
        };
        drop(registry);

        info!(
            factory = %self.address,
            market = %id,
            creator = %caller,
            resolver = %resolver,
            close_time,
            "Market created"
        );
        self.ctx.notifiers.notify_all(Event {
            source: self.address,
            sequence,
            record: Record::from(created.clone()),
        });
        Ok(created)
    }

    #[must_use]
    pub fn markets_count(&self) -> usize {
        self.registry.read().markets.len()
    }

    /// Identifier of the `index`-th market, in creation order.
    pub fn market_at(&self, index: usize) -> Result<MarketId, LedgerError> {
        let registry = self.registry.read();
        registry.markets.get(index).copied().ok_or_else(|| {
            ArgumentViolation::IndexOutOfRange {
                index,
                count: registry.markets.len(),
            }
            .into()
        })
    }

    /// All market identifiers, in creation order.
    #[must_use]
    pub fn market_ids(&self) -> Vec<MarketId> {
        self.registry.read().markets.clone()
    }

    /// Look up a deployed market.
    #[must_use]
    pub fn market(&self, id: &MarketId) -> Option<Arc<PredictionMarket>> {
        self.markets.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Every record the factory has emitted, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.journal.read().clone()
    }
}

impl fmt::Debug for MarketFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketFactory")
            .field("address", &self.address)
            .field("owner", &self.owner)
            .field("settings", &self.settings)
            .field("markets", &self.markets_count())
            .finish_non_exhaustive()
    }
}
