//! Consensus market - a pari-mutuel prediction market ledger.
//!
//! Participants stake on a binary question (yes/no) before a deadline, a
//! designated resolver declares the outcome after the deadline, and winners
//! redeem a share of the combined pool proportional to their winning-side
//! stake. A fee is skimmed from every stake and withdrawn by a fee recipient.
//!
//! # Architecture
//!
//! - **`domain`** - Custody-agnostic types and the market state machine
//! - **`port`** - Clock, treasury and notifier traits
//! - **`adapter`** - In-process implementations of those traits
//! - **`application`** - `MarketFactory` and `PredictionMarket` services
//! - **`infrastructure`** - TOML configuration and logging setup
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use consensus_market::adapter::outbound::{InMemoryTreasury, ManualClock};
//! use consensus_market::application::{FactorySettings, LedgerContext, MarketFactory};
//! use consensus_market::domain::{Address, Outcome};
//! use consensus_market::port::NotifierRegistry;
//!
//! let clock = Arc::new(ManualClock::new(1_000));
//! let treasury = Arc::new(InMemoryTreasury::new());
//! let ctx = LedgerContext::new(clock.clone(), treasury.clone(), Arc::new(NotifierRegistry::new()));
//!
//! let owner = Address::with_last_byte(1);
//! let alice = Address::with_last_byte(2);
//! treasury.mint(alice, 10_000).unwrap();
//!
//! let factory = MarketFactory::new(owner, FactorySettings::default(), ctx);
//! factory.set_approved_creator(owner, owner, true).unwrap();
//! let created = factory.create_market(owner, "Will it rain?", 1_100, owner).unwrap();
//! let market = factory.market(&created.market).unwrap();
//!
//! market.stake_yes(alice, 10_000).unwrap();
//! clock.set(1_100);
//! market.resolve(owner, Outcome::Yes).unwrap();
//! assert_eq!(market.redeem(alice).unwrap().payout, 9_950);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
