//! Notifier port for emitted records.
//!
//! Every successful factory or market operation emits a [`Record`]. The
//! emitting component wraps it in an [`Event`] and hands it to its
//! [`NotifierRegistry`], which fans it out to every registered [`Notifier`].

use alloy_primitives::Address;

use crate::domain::Record;

/// A record together with where and in which order it was emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// The factory or market that emitted the record.
    pub source: Address,
    /// Position of the record in the source's journal, starting at 0.
    pub sequence: u64,
    /// The emitted record.
    pub record: Record,
}

/// Trait for notification handlers.
///
/// Implement this trait to observe records as they are emitted.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `notify` runs after the operation has committed but before it returns to
///   its caller, so it should not block or perform slow I/O synchronously
/// - Calling back into the emitting market from `notify` is rejected as
///   re-entry
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that logs events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        use tracing::info;
        let source = event.source;
        let sequence = event.sequence;
        match event.record {
            Record::MarketCreated(e) => {
                info!(
                    %source,
                    sequence,
                    market = %e.market,
                    creator = %e.creator,
                    resolver = %e.resolver,
                    fee_recipient = %e.fee_recipient,
                    question_id = %e.question_id,
                    close_time = e.close_time,
                    question = %e.question,
                    "Market created"
                );
            }
            Record::Staked(e) => {
                info!(
                    %source,
                    sequence,
                    trader = %e.trader,
                    side = %e.side,
                    gross = %e.gross_amount,
                    fee = %e.fee,
                    net = %e.net_amount,
                    "Stake placed"
                );
            }
            Record::Resolved(e) => {
                info!(%source, sequence, outcome = %e.outcome, "Market resolved");
            }
            Record::FeesWithdrawn(e) => {
                info!(
                    %source,
                    sequence,
                    recipient = %e.recipient,
                    amount = %e.amount,
                    "Fees withdrawn"
                );
            }
            Record::Redeemed(e) => {
                info!(
                    %source,
                    sequence,
                    trader = %e.trader,
                    payout = %e.payout,
                    "Winnings redeemed"
                );
            }
        }
    }
}
