//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the infrastructure a market depends on: time,
//! custody of funds, and notifications.

pub mod clock;
pub mod notifier;
pub mod treasury;
