//! A wired factory for tests and simulations.

use std::sync::Arc;

use alloy_primitives::Address;

use super::domain::addr;
use crate::adapter::outbound::{InMemoryTreasury, ManualClock};
use crate::application::{FactorySettings, LedgerContext, MarketFactory, PredictionMarket};
use crate::domain::{Amount, MarketCreated, Timestamp};
use crate::port::{Clock, NotifierRegistry};

/// Clock reading the harness starts at.
pub const GENESIS: Timestamp = 1_700_000_000;

/// Factory owner used by the harness.
pub fn owner() -> Address {
    addr(0xa0)
}

/// Creator pre-approved by the harness.
pub fn creator() -> Address {
    addr(0xc0)
}

/// Resolver assigned to markets opened through [`Harness::open_market`].
pub fn resolver() -> Address {
    addr(0xe0)
}

/// A factory on a manual clock and an in-memory treasury.
pub struct Harness {
    pub clock: Arc<ManualClock>,
    pub treasury: Arc<InMemoryTreasury>,
    pub factory: MarketFactory,
}

impl Harness {
    /// Default settings, no notifiers, [`creator`] approved.
    pub fn new() -> Self {
        Self::with(FactorySettings::default(), NotifierRegistry::new())
    }

    /// Custom settings and notifiers, [`creator`] approved.
    pub fn with(settings: FactorySettings, notifiers: NotifierRegistry) -> Self {
        let clock = Arc::new(ManualClock::new(GENESIS));
        let treasury = Arc::new(InMemoryTreasury::new());
        Self::on(clock, treasury, settings, notifiers)
    }

    /// Build on an existing clock and treasury.
    pub fn on(
        clock: Arc<ManualClock>,
        treasury: Arc<InMemoryTreasury>,
        settings: FactorySettings,
        notifiers: NotifierRegistry,
    ) -> Self {
        let ctx = LedgerContext::new(clock.clone(), treasury.clone(), Arc::new(notifiers));
        let factory = MarketFactory::new(owner(), settings, ctx);
        factory
            .set_approved_creator(owner(), creator(), true)
            .expect("owner approves creator");
        Self {
            clock,
            treasury,
            factory,
        }
    }

    /// Credit `amount` to each account.
    pub fn fund(&self, accounts: &[Address], amount: Amount) {
        for account in accounts {
            self.treasury.mint(*account, amount).expect("mint");
        }
    }

    /// Open a market closing `lifetime` seconds from now, resolved by [`resolver`].
    pub fn open_market(&self, question: &str, lifetime: u64) -> Arc<PredictionMarket> {
        let created = self.create(question, lifetime);
        self.factory
            .market(&created.market)
            .expect("created market is registered")
    }

    /// Like [`Harness::open_market`] but returns the creation record.
    pub fn create(&self, question: &str, lifetime: u64) -> MarketCreated {
        let close_time = self.clock.now() + lifetime;
        self.factory
            .create_market(creator(), question, close_time, resolver())
            .expect("approved creator opens market")
    }

    /// Move the clock past `market`'s close time.
    pub fn close(&self, market: &PredictionMarket) {
        self.clock.set(market.close_time());
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
