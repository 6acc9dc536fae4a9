//! Outbound adapters (driven side).

pub mod channel;
pub mod clock;
pub mod treasury;

pub use channel::ChannelNotifier;
pub use clock::{ManualClock, SystemClock};
pub use treasury::InMemoryTreasury;
