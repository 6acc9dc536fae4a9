//! Clock port.

use crate::domain::Timestamp;

/// Source of the current time.
///
/// Markets read the clock on every time-gated operation (staking closes and
/// resolution opens at `close_time`), so tests and simulations inject a
/// controllable implementation.
pub trait Clock: Send + Sync {
    /// Current unix time in seconds.
    fn now(&self) -> Timestamp;
}
