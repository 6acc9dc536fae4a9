//! Prediction market service.
//!
//! Wraps one [`Market`]'s books with everything needed to run it against real
//! custody: a clock, a treasury and notifiers. Each mutating operation runs
//! as one indivisible unit:
//!
//! 1. enter the market's operation guard (other threads wait, nested calls on
//!    the same thread are rejected)
//! 2. audit the escrow against the books
//! 3. validate and commit the transition
//! 4. move funds; if the treasury refuses, unwind the transition
//! 5. journal and publish the emitted record
//!
//! State is always committed before funds leave the escrow, and the guard is
//! held across the transfer, so a treasury or recipient hook that calls back
//! into the market cannot observe a half-applied operation or claim twice.

use std::cell::Cell;
use std::sync::Arc;

use alloy_primitives::Address;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard, RwLock};
use tracing::{error, info, warn};

use crate::domain::{
    Amount, FeesWithdrawn, LedgerError, Market, MarketId, MarketSnapshot, MarketTerms, Outcome,
    QuestionId, Record, Redeemed, Resolved, Side, Stake, Staked, StateViolation, Timestamp,
    TransferError,
};
use crate::port::{Clock, Event, NotifierRegistry, Treasury};

/// Shared infrastructure handed to the factory and every market it creates.
#[derive(Clone)]
pub struct LedgerContext {
    pub clock: Arc<dyn Clock>,
    pub treasury: Arc<dyn Treasury>,
    pub notifiers: Arc<NotifierRegistry>,
}

impl LedgerContext {
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        treasury: Arc<dyn Treasury>,
        notifiers: Arc<NotifierRegistry>,
    ) -> Self {
        Self {
            clock,
            treasury,
            notifiers,
        }
    }
}

/// Held for the duration of one mutating operation.
struct Entry<'a> {
    guard: ReentrantMutexGuard<'a, Cell<bool>>,
}

impl Drop for Entry<'_> {
    fn drop(&mut self) {
        self.guard.set(false);
    }
}

/// One live market.
pub struct PredictionMarket {
    id: MarketId,
    books: RwLock<Market>,
    journal: RwLock<Vec<Record>>,
    entry: ReentrantMutex<Cell<bool>>,
    ctx: LedgerContext,
}

impl PredictionMarket {
    /// Open a market with empty pools under the given terms.
    #[must_use]
    pub fn new(terms: MarketTerms, ctx: LedgerContext) -> Self {
        Self {
            id: terms.id,
            books: RwLock::new(Market::new(terms)),
            journal: RwLock::new(Vec::new()),
            entry: ReentrantMutex::new(Cell::new(false)),
            ctx,
        }
    }

    // --- read accessors ---

    #[must_use]
    pub fn id(&self) -> MarketId {
        self.id
    }

    #[must_use]
    pub fn terms(&self) -> MarketTerms {
        self.books.read().terms().clone()
    }

    #[must_use]
    pub fn question(&self) -> String {
        self.books.read().terms().question.clone()
    }

    #[must_use]
    pub fn question_id(&self) -> QuestionId {
        self.books.read().terms().question_id
    }

    #[must_use]
    pub fn close_time(&self) -> Timestamp {
        self.books.read().terms().close_time
    }

    #[must_use]
    pub fn resolver(&self) -> Address {
        self.books.read().terms().resolver
    }

    #[must_use]
    pub fn fee_recipient(&self) -> Address {
        self.books.read().terms().fee_recipient
    }

    /// Fee rate in basis points, fixed at creation.
    #[must_use]
    pub fn fee_bps(&self) -> u16 {
        self.books.read().terms().fee_policy.bps()
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.books.read().outcome()
    }

    #[must_use]
    pub fn total_yes_pool(&self) -> Amount {
        self.books.read().total_yes_pool()
    }

    #[must_use]
    pub fn total_no_pool(&self) -> Amount {
        self.books.read().total_no_pool()
    }

    #[must_use]
    pub fn fees_accrued(&self) -> Amount {
        self.books.read().fees_accrued()
    }

    /// Net pool of one side.
    #[must_use]
    pub fn pool(&self, side: Side) -> Amount {
        self.books.read().pool(side)
    }

    #[must_use]
    pub fn stake_of(&self, participant: &Address, side: Side) -> Amount {
        self.books.read().stake_of(participant, side)
    }

    #[must_use]
    pub fn position(&self, participant: &Address) -> Stake {
        self.books.read().stake(participant)
    }

    #[must_use]
    pub fn claimed(&self, participant: &Address) -> bool {
        self.books.read().claimed(participant)
    }

    #[must_use]
    pub fn snapshot(&self) -> MarketSnapshot {
        self.books.read().snapshot()
    }

    /// Every record this market has emitted, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.journal.read().clone()
    }

    /// Funds currently held in the market's escrow account.
    #[must_use]
    pub fn escrow_balance(&self) -> Amount {
        self.ctx.treasury.balance_of(&self.id.address())
    }

    /// Escrow funds the books do not account for, i.e. unsolicited deposits.
    #[must_use]
    pub fn escrow_surplus(&self) -> Amount {
        let expected = self.books.read().expected_escrow();
        self.escrow_balance().saturating_sub(expected)
    }

    /// Check that the escrow covers everything the books say it owes.
    ///
    /// Serialized with mutating operations, so it never observes one midway.
    /// A surplus is tolerated; only a shortfall is a violation.
    pub fn audit(&self) -> Result<(), LedgerError> {
        let _entry = self.enter()?;
        self.check_escrow()
    }

    // --- mutating operations ---

    /// Stake `amount` on `side`, pulling the gross amount from the caller.
    pub fn stake(&self, caller: Address, side: Side, amount: Amount) -> Result<Staked, LedgerError> {
        let _entry = self.enter()?;
        self.check_escrow()?;

        let now = self.ctx.clock.now();
        let staked = self
            .books
            .write()
            .stake_side(caller, side, amount, now)
            .map_err(|err| self.rejected("stake", caller, err))?;

        let escrow = self.id.address();
        self.settle(Record::from(staked), || {
            self.ctx.treasury.transfer(caller, escrow, amount)
        })?;

        info!(
            market = %self.id,
            trader = %caller,
            side = %side,
            gross = %staked.gross_amount,
            fee = %staked.fee,
            "Stake accepted"
        );
        Ok(staked)
    }

    /// Stake on the yes side.
    pub fn stake_yes(&self, caller: Address, amount: Amount) -> Result<Staked, LedgerError> {
        self.stake(caller, Side::Yes, amount)
    }

    /// Stake on the no side.
    pub fn stake_no(&self, caller: Address, amount: Amount) -> Result<Staked, LedgerError> {
        self.stake(caller, Side::No, amount)
    }

    /// Set the final outcome. Resolver only, once, at or after close time.
    pub fn resolve(&self, caller: Address, outcome: Outcome) -> Result<Resolved, LedgerError> {
        let _entry = self.enter()?;
        self.check_escrow()?;

        let now = self.ctx.clock.now();
        let resolved = self
            .books
            .write()
            .resolve(caller, outcome, now)
            .map_err(|err| self.rejected("resolve", caller, err))?;

        self.publish(Record::from(resolved));
        info!(market = %self.id, outcome = %outcome, "Market resolved");
        Ok(resolved)
    }

    /// Pay the caller their share of the combined pool.
    pub fn redeem(&self, caller: Address) -> Result<Redeemed, LedgerError> {
        let _entry = self.enter()?;
        self.check_escrow()?;

        let redeemed = self
            .books
            .write()
            .redeem(caller)
            .map_err(|err| self.rejected("redeem", caller, err))?;

        let escrow = self.id.address();
        self.settle(Record::from(redeemed), || {
            self.ctx.treasury.transfer(escrow, caller, redeemed.payout)
        })?;

        info!(market = %self.id, trader = %caller, payout = %redeemed.payout, "Winnings redeemed");
        Ok(redeemed)
    }

    /// Sweep every accrued fee to the fee recipient.
    pub fn withdraw_fees(&self, caller: Address) -> Result<FeesWithdrawn, LedgerError> {
        let _entry = self.enter()?;
        self.check_escrow()?;

        let withdrawn = self
            .books
            .write()
            .withdraw_fees(caller)
            .map_err(|err| self.rejected("withdraw_fees", caller, err))?;

        let escrow = self.id.address();
        self.settle(Record::from(withdrawn), || {
            self.ctx.treasury.transfer(escrow, caller, withdrawn.amount)
        })?;

        info!(market = %self.id, recipient = %caller, amount = %withdrawn.amount, "Fees withdrawn");
        Ok(withdrawn)
    }

    // --- internals ---

    fn enter(&self) -> Result<Entry<'_>, LedgerError> {
        let guard = self.entry.lock();
        if guard.replace(true) {
            // Already inside an operation on this thread. Leave the flag set
            // for the outer operation.
            warn!(market = %self.id, "Reentrant call rejected");
            return Err(StateViolation::Reentrant.into());
        }
        Ok(Entry { guard })
    }

    fn check_escrow(&self) -> Result<(), LedgerError> {
        let expected = self.books.read().expected_escrow();
        let actual = self.escrow_balance();
        if actual < expected {
            error!(
                market = %self.id,
                expected = %expected,
                actual = %actual,
                "Escrow short of books"
            );
            return Err(LedgerError::InvariantViolation { expected, actual });
        }
        if actual > expected {
            // Unsolicited deposits stay stranded, like rounding remainders.
            warn!(
                market = %self.id,
                surplus = %(actual - expected),
                "Escrow holds funds the books do not account for"
            );
        }
        Ok(())
    }

    /// Run the transfer for a committed transition, unwinding it on failure.
    fn settle(
        &self,
        record: Record,
        transfer: impl FnOnce() -> Result<(), TransferError>,
    ) -> Result<(), LedgerError> {
        if let Err(err) = transfer() {
            self.books.write().unwind(&record);
            warn!(
                market = %self.id,
                record = record.name(),
                error = %err,
                "Transfer failed, transition unwound"
            );
            return Err(err.into());
        }
        self.publish(record);
        Ok(())
    }

    fn publish(&self, record: Record) {
        let sequence = {
            let mut journal = self.journal.write();
            journal.push(record.clone());
            journal.len() as u64 - 1
        };
        self.ctx.notifiers.notify_all(Event {
            source: self.id.address(),
            sequence,
            record,
        });
    }

    fn rejected(&self, operation: &'static str, caller: Address, err: LedgerError) -> LedgerError {
        warn!(market = %self.id, operation, caller = %caller, error = %err, "Operation rejected");
        err
    }
}

impl std::fmt::Debug for PredictionMarket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionMarket")
            .field("id", &self.id)
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}
