//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  (factory + markets)    ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │  Clock  │            │  Treasury   │              │ Notifier  │
//! │ Adapter │            │   Adapter   │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`Clock`] - Current time for close-time gating
//! - [`Treasury`] - Balances and fund transfers
//! - [`Notifier`] - Outbound notification of emitted records

pub mod outbound;

pub use outbound::clock::Clock;
pub use outbound::notifier::{Event, LogNotifier, Notifier, NotifierRegistry, NullNotifier};
pub use outbound::treasury::Treasury;
