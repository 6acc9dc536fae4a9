//! Application services (use cases).
//!
//! These services run the domain state machine against real custody: they
//! serialize operations, move funds through the [`Treasury`](crate::port::Treasury)
//! port and publish emitted records to notifiers.

pub mod factory;
pub mod market;

pub use factory::{FactorySettings, FeeRecipientPolicy, MarketFactory};
pub use market::{LedgerContext, PredictionMarket};
