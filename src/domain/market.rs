//! Prediction market state machine.
//!
//! A [`Market`] owns one market's books: per-side pools, per-participant
//! stakes, accrued fees and the outcome. It knows nothing about custody or
//! concurrency; every transition either applies completely or returns an
//! error without touching the books.
//!
//! ```text
//!   Open (Unresolved) ──resolve──▶ Resolved(Yes | No)   (terminal)
//! ```
//!
//! Funds movement is the caller's job: a successful transition returns the
//! record describing what must be transferred, and [`Market::unwind`] reverses
//! the transition if that transfer fails.

use std::collections::HashMap;

use alloy_primitives::Address;

use super::error::{ArgumentViolation, LedgerError, Role, StateViolation};
use super::fee::FeePolicy;
use super::id::{MarketId, QuestionId};
use super::money::{Amount, Timestamp};
use super::outcome::{Outcome, Side};
use super::record::{FeesWithdrawn, Record, Redeemed, Resolved, Staked};
use super::redemption;

/// Immutable parameters fixed when a market is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketTerms {
    pub id: MarketId,
    pub question: String,
    pub question_id: QuestionId,
    pub close_time: Timestamp,
    pub resolver: Address,
    pub fee_recipient: Address,
    pub fee_policy: FeePolicy,
}

impl MarketTerms {
    /// Build terms, deriving the question id from the question text.
    #[must_use]
    pub fn new(
        id: MarketId,
        question: impl Into<String>,
        close_time: Timestamp,
        resolver: Address,
        fee_recipient: Address,
        fee_policy: FeePolicy,
    ) -> Self {
        let question = question.into();
        Self {
            id,
            question_id: QuestionId::from_question(&question),
            question,
            close_time,
            resolver,
            fee_recipient,
            fee_policy,
        }
    }
}

/// A participant's position in one market.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stake {
    pub net_yes: Amount,
    pub net_no: Amount,
    pub claimed: bool,
}

impl Stake {
    /// Net amount staked on `side`.
    #[must_use]
    pub const fn on(&self, side: Side) -> Amount {
        match side {
            Side::Yes => self.net_yes,
            Side::No => self.net_no,
        }
    }

    fn on_mut(&mut self, side: Side) -> &mut Amount {
        match side {
            Side::Yes => &mut self.net_yes,
            Side::No => &mut self.net_no,
        }
    }
}

/// Point-in-time view of a market's aggregate figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketSnapshot {
    pub outcome: Outcome,
    pub total_yes_pool: Amount,
    pub total_no_pool: Amount,
    pub fees_accrued: Amount,
    pub paid_out: Amount,
    pub participants: usize,
}

impl MarketSnapshot {
    /// Combined net pool of both sides.
    #[must_use]
    pub const fn combined_pool(&self) -> Amount {
        self.total_yes_pool + self.total_no_pool
    }
}

/// One market's books.
#[derive(Debug, Clone)]
pub struct Market {
    terms: MarketTerms,
    outcome: Outcome,
    total_yes_pool: Amount,
    total_no_pool: Amount,
    fees_accrued: Amount,
    paid_out: Amount,
    stakes: HashMap<Address, Stake>,
}

impl Market {
    /// Open a market with empty pools.
    #[must_use]
    pub fn new(terms: MarketTerms) -> Self {
        Self {
            terms,
            outcome: Outcome::Unresolved,
            total_yes_pool: 0,
            total_no_pool: 0,
            fees_accrued: 0,
            paid_out: 0,
            stakes: HashMap::new(),
        }
    }

    #[must_use]
    pub fn terms(&self) -> &MarketTerms {
        &self.terms
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn total_yes_pool(&self) -> Amount {
        self.total_yes_pool
    }

    #[must_use]
    pub fn total_no_pool(&self) -> Amount {
        self.total_no_pool
    }

    #[must_use]
    pub fn fees_accrued(&self) -> Amount {
        self.fees_accrued
    }

    /// Sum of all redemption payouts so far.
    #[must_use]
    pub fn paid_out(&self) -> Amount {
        self.paid_out
    }

    /// Net pool of one side.
    #[must_use]
    pub fn pool(&self, side: Side) -> Amount {
        match side {
            Side::Yes => self.total_yes_pool,
            Side::No => self.total_no_pool,
        }
    }

    /// The participant's position; empty if they never staked.
    #[must_use]
    pub fn stake(&self, participant: &Address) -> Stake {
        self.stakes.get(participant).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn stake_of(&self, participant: &Address, side: Side) -> Amount {
        self.stake(participant).on(side)
    }

    #[must_use]
    pub fn claimed(&self, participant: &Address) -> bool {
        self.stake(participant).claimed
    }

    #[must_use]
    pub fn snapshot(&self) -> MarketSnapshot {
        MarketSnapshot {
            outcome: self.outcome,
            total_yes_pool: self.total_yes_pool,
            total_no_pool: self.total_no_pool,
            fees_accrued: self.fees_accrued,
            paid_out: self.paid_out,
            participants: self.stakes.len(),
        }
    }

    /// Amount the escrow must hold for the books to balance:
    /// `yes + no - paid_out + fees`.
    #[must_use]
    pub fn expected_escrow(&self) -> Amount {
        (self.total_yes_pool + self.total_no_pool - self.paid_out) + self.fees_accrued
    }

    /// Credit a stake of `gross` on `side`, net of the protocol fee.
    ///
    /// Staking is only allowed while the market is unresolved and `now` is
    /// before the close time.
    pub fn stake_side(
        &mut self,
        trader: Address,
        side: Side,
        gross: Amount,
        now: Timestamp,
    ) -> Result<Staked, LedgerError> {
        if gross == 0 {
            return Err(ArgumentViolation::ZeroAmount.into());
        }
        if self.outcome.is_resolved() {
            return Err(StateViolation::AlreadyResolved.into());
        }
        if now >= self.terms.close_time {
            return Err(StateViolation::StakingClosed {
                close_time: self.terms.close_time,
            }
            .into());
        }

        let split = self.terms.fee_policy.split(gross);
        let overflow = || LedgerError::from(ArgumentViolation::AmountOverflow { amount: gross });

        let pool = self.pool(side).checked_add(split.net).ok_or_else(overflow)?;
        let fees = self
            .fees_accrued
            .checked_add(split.fee)
            .ok_or_else(overflow)?;
        // Pool totals bound every individual stake, so this cannot overflow.
        let position = self.stake(&trader).on(side) + split.net;
        // The escrow holds pools plus fees; keep that sum representable too.
        self.total_yes_pool
            .checked_add(self.total_no_pool)
            .and_then(|total| total.checked_add(self.fees_accrued))
            .and_then(|total| total.checked_add(gross))
            .ok_or_else(overflow)?;

        match side {
            Side::Yes => self.total_yes_pool = pool,
            Side::No => self.total_no_pool = pool,
        }
        self.fees_accrued = fees;
        *self.stakes.entry(trader).or_default().on_mut(side) = position;

        Ok(Staked {
            trader,
            side,
            gross_amount: split.gross,
            fee: split.fee,
            net_amount: split.net,
        })
    }

    /// Set the final outcome. Only the resolver may do this, only once, and
    /// not before the close time.
    pub fn resolve(
        &mut self,
        caller: Address,
        outcome: Outcome,
        now: Timestamp,
    ) -> Result<Resolved, LedgerError> {
        if !outcome.is_resolved() {
            return Err(ArgumentViolation::UnresolvedOutcome.into());
        }
        if caller != self.terms.resolver {
            return Err(LedgerError::unauthorized(Role::Resolver, caller));
        }
        if now < self.terms.close_time {
            return Err(StateViolation::NotClosed {
                close_time: self.terms.close_time,
                now,
            }
            .into());
        }
        if self.outcome.is_resolved() {
            return Err(StateViolation::AlreadyResolved.into());
        }

        self.outcome = outcome;
        Ok(Resolved { outcome })
    }

    /// Mark the caller's winnings as claimed and compute their payout.
    pub fn redeem(&mut self, caller: Address) -> Result<Redeemed, LedgerError> {
        let Some(winner) = self.outcome.winning_side() else {
            return Err(StateViolation::NotResolved.into());
        };
        let position = self.stake(&caller);
        if position.claimed {
            return Err(StateViolation::AlreadyClaimed.into());
        }
        let stake = position.on(winner);
        if stake == 0 {
            return Err(ArgumentViolation::NothingToRedeem.into());
        }

        let combined = self.total_yes_pool + self.total_no_pool;
        let payout = redemption::payout(stake, self.pool(winner), combined);

        self.stakes.entry(caller).or_default().claimed = true;
        self.paid_out += payout;

        Ok(Redeemed {
            trader: caller,
            payout,
        })
    }

    /// Take every accrued fee, resetting the counter to zero.
    pub fn withdraw_fees(&mut self, caller: Address) -> Result<FeesWithdrawn, LedgerError> {
        if caller != self.terms.fee_recipient {
            return Err(LedgerError::unauthorized(Role::FeeRecipient, caller));
        }
        if self.fees_accrued == 0 {
            return Err(StateViolation::NoFeesAccrued.into());
        }

        let amount = std::mem::take(&mut self.fees_accrued);
        Ok(FeesWithdrawn {
            recipient: caller,
            amount,
        })
    }

    /// Reverse a transition whose fund transfer failed.
    ///
    /// Only the record returned by the most recent transition may be unwound.
    pub fn unwind(&mut self, record: &Record) {
        match record {
            Record::Staked(staked) => {
                match staked.side {
                    Side::Yes => self.total_yes_pool -= staked.net_amount,
                    Side::No => self.total_no_pool -= staked.net_amount,
                }
                self.fees_accrued -= staked.fee;
                if let Some(position) = self.stakes.get_mut(&staked.trader) {
                    *position.on_mut(staked.side) -= staked.net_amount;
                    if *position == Stake::default() {
                        self.stakes.remove(&staked.trader);
                    }
                }
            }
            Record::Redeemed(redeemed) => {
                if let Some(position) = self.stakes.get_mut(&redeemed.trader) {
                    position.claimed = false;
                }
                self.paid_out -= redeemed.payout;
            }
            Record::FeesWithdrawn(withdrawn) => {
                self.fees_accrued += withdrawn.amount;
            }
            Record::Resolved(_) | Record::MarketCreated(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MILLI: Amount = 1_000_000_000_000_000;
    const ETHER: Amount = 1_000 * MILLI;
    const CLOSE: Timestamp = 1_000;

    fn addr(n: u8) -> Address {
        Address::with_last_byte(n)
    }

    fn resolver() -> Address {
        addr(0xee)
    }

    fn fee_recipient() -> Address {
        addr(0xfe)
    }

    fn market() -> Market {
        Market::new(MarketTerms::new(
            MarketId::derive(&addr(0xfa), 0),
            "Lifecycle test market",
            CLOSE,
            resolver(),
            fee_recipient(),
            FeePolicy::default(),
        ))
    }

    #[test]
    fn new_market_is_open_and_empty() {
        let market = market();
        assert_eq!(market.outcome(), Outcome::Unresolved);
        assert_eq!(market.total_yes_pool(), 0);
        assert_eq!(market.total_no_pool(), 0);
        assert_eq!(market.fees_accrued(), 0);
        assert_eq!(market.expected_escrow(), 0);
        assert_eq!(
            market.terms().question_id,
            QuestionId::from_question("Lifecycle test market")
        );
    }

    #[test]
    fn stake_credits_net_and_accrues_fee() {
        let mut market = market();
        let staked = market.stake_side(addr(1), Side::Yes, ETHER, 0).unwrap();

        assert_eq!(staked.gross_amount, ETHER);
        assert_eq!(staked.fee, 5 * MILLI);
        assert_eq!(staked.net_amount, 995 * MILLI);
        assert_eq!(market.total_yes_pool(), 995 * MILLI);
        assert_eq!(market.fees_accrued(), 5 * MILLI);
        assert_eq!(market.stake_of(&addr(1), Side::Yes), 995 * MILLI);
        assert_eq!(market.stake_of(&addr(1), Side::No), 0);
        assert_eq!(market.expected_escrow(), ETHER);
    }

    #[test]
    fn stakes_accumulate_per_participant_and_side() {
        let mut market = market();
        market.stake_side(addr(1), Side::Yes, ETHER, 0).unwrap();
        market.stake_side(addr(1), Side::Yes, ETHER, 0).unwrap();
        market.stake_side(addr(1), Side::No, 2 * ETHER, 0).unwrap();

        assert_eq!(market.stake_of(&addr(1), Side::Yes), 2 * 995 * MILLI);
        assert_eq!(market.stake_of(&addr(1), Side::No), 1_990 * MILLI);
        assert_eq!(market.fees_accrued(), 20 * MILLI);
        assert_eq!(market.snapshot().participants, 1);
    }

    #[test]
    fn zero_stake_is_rejected_without_effect() {
        let mut market = market();
        let err = market.stake_side(addr(1), Side::Yes, 0, 0).unwrap_err();
        assert_eq!(err, LedgerError::from(ArgumentViolation::ZeroAmount));
        assert_eq!(market.snapshot().participants, 0);
    }

    #[test]
    fn stake_after_close_is_rejected() {
        let mut market = market();
        let err = market.stake_side(addr(1), Side::No, ETHER, CLOSE).unwrap_err();
        assert_eq!(
            err,
            LedgerError::from(StateViolation::StakingClosed { close_time: CLOSE })
        );
        assert_eq!(market.total_no_pool(), 0);
    }

    #[test]
    fn stake_overflow_is_rejected_without_effect() {
        let mut market = market();
        market.stake_side(addr(1), Side::Yes, u128::MAX / 2, 0).unwrap();
        let before = market.snapshot();

        let err = market
            .stake_side(addr(2), Side::No, u128::MAX / 2 + 10, 0)
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidArgument(ArgumentViolation::AmountOverflow { .. })
        ));
        assert_eq!(market.snapshot(), before);
    }

    #[test]
    fn resolve_requires_binary_outcome() {
        let mut market = market();
        let err = market
            .resolve(resolver(), Outcome::Unresolved, CLOSE)
            .unwrap_err();
        assert_eq!(err, LedgerError::from(ArgumentViolation::UnresolvedOutcome));
    }

    #[test]
    fn resolve_rejects_non_resolver_even_after_close() {
        let mut market = market();
        let err = market.resolve(addr(1), Outcome::Yes, CLOSE + 10).unwrap_err();
        assert_eq!(err, LedgerError::unauthorized(Role::Resolver, addr(1)));
        assert_eq!(market.outcome(), Outcome::Unresolved);
    }

    #[test]
    fn resolve_rejects_before_close() {
        let mut market = market();
        let err = market.resolve(resolver(), Outcome::Yes, CLOSE - 1).unwrap_err();
        assert_eq!(
            err,
            LedgerError::from(StateViolation::NotClosed {
                close_time: CLOSE,
                now: CLOSE - 1
            })
        );
    }

    #[test]
    fn resolve_succeeds_once() {
        let mut market = market();
        let resolved = market.resolve(resolver(), Outcome::No, CLOSE).unwrap();
        assert_eq!(resolved.outcome, Outcome::No);

        let err = market.resolve(resolver(), Outcome::Yes, CLOSE + 1).unwrap_err();
        assert_eq!(err, LedgerError::from(StateViolation::AlreadyResolved));
        assert_eq!(market.outcome(), Outcome::No);
    }

    #[test]
    fn stake_after_resolution_is_rejected() {
        let mut market = market();
        market.resolve(resolver(), Outcome::Yes, CLOSE).unwrap();
        let err = market.stake_side(addr(1), Side::Yes, ETHER, 0).unwrap_err();
        assert_eq!(err, LedgerError::from(StateViolation::AlreadyResolved));
    }

    #[test]
    fn redeem_before_resolution_is_rejected() {
        let mut market = market();
        market.stake_side(addr(1), Side::Yes, ETHER, 0).unwrap();
        let err = market.redeem(addr(1)).unwrap_err();
        assert_eq!(err, LedgerError::from(StateViolation::NotResolved));
    }

    #[test]
    fn sole_winner_redeems_combined_pool() {
        let mut market = market();
        market.stake_side(addr(1), Side::Yes, ETHER, 0).unwrap();
        market.stake_side(addr(2), Side::No, 2 * ETHER, 0).unwrap();
        market.resolve(resolver(), Outcome::Yes, CLOSE).unwrap();

        let redeemed = market.redeem(addr(1)).unwrap();
        assert_eq!(redeemed.payout, 2_985 * MILLI);
        assert!(market.claimed(&addr(1)));
        assert_eq!(market.expected_escrow(), 15 * MILLI);
    }

    #[test]
    fn second_redeem_is_rejected() {
        let mut market = market();
        market.stake_side(addr(1), Side::Yes, ETHER, 0).unwrap();
        market.resolve(resolver(), Outcome::Yes, CLOSE).unwrap();
        market.redeem(addr(1)).unwrap();

        let err = market.redeem(addr(1)).unwrap_err();
        assert_eq!(err, LedgerError::from(StateViolation::AlreadyClaimed));
        assert_eq!(market.paid_out(), 995 * MILLI);
    }

    #[test]
    fn losing_side_has_nothing_to_redeem() {
        let mut market = market();
        market.stake_side(addr(1), Side::Yes, ETHER, 0).unwrap();
        market.stake_side(addr(2), Side::No, 2 * ETHER, 0).unwrap();
        market.resolve(resolver(), Outcome::Yes, CLOSE).unwrap();

        let err = market.redeem(addr(2)).unwrap_err();
        assert_eq!(err, LedgerError::from(ArgumentViolation::NothingToRedeem));
        assert!(!market.claimed(&addr(2)));
    }

    #[test]
    fn withdraw_fees_requires_fee_recipient() {
        let mut market = market();
        market.stake_side(addr(1), Side::Yes, ETHER, 0).unwrap();
        let err = market.withdraw_fees(resolver()).unwrap_err();
        assert_eq!(
            err,
            LedgerError::unauthorized(Role::FeeRecipient, resolver())
        );
        assert_eq!(market.fees_accrued(), 5 * MILLI);
    }

    #[test]
    fn withdraw_fees_resets_counter() {
        let mut market = market();
        market.stake_side(addr(1), Side::Yes, 3 * ETHER, 0).unwrap();
        let withdrawn = market.withdraw_fees(fee_recipient()).unwrap();
        assert_eq!(withdrawn.amount, 15 * MILLI);
        assert_eq!(market.fees_accrued(), 0);

        let err = market.withdraw_fees(fee_recipient()).unwrap_err();
        assert_eq!(err, LedgerError::from(StateViolation::NoFeesAccrued));
    }

    #[test]
    fn unwind_restores_books() {
        let mut market = market();
        market.stake_side(addr(1), Side::Yes, ETHER, 0).unwrap();
        let before = market.snapshot();

        let staked = market.stake_side(addr(2), Side::No, ETHER, 0).unwrap();
        market.unwind(&Record::from(staked));
        assert_eq!(market.snapshot(), before);
        assert_eq!(market.stake(&addr(2)), Stake::default());

        market.resolve(resolver(), Outcome::Yes, CLOSE).unwrap();
        let before = market.snapshot();
        let redeemed = market.redeem(addr(1)).unwrap();
        market.unwind(&Record::from(redeemed));
        assert_eq!(market.snapshot(), before);
        assert!(!market.claimed(&addr(1)));

        let withdrawn = market.withdraw_fees(fee_recipient()).unwrap();
        market.unwind(&Record::from(withdrawn));
        assert_eq!(market.fees_accrued(), 5 * MILLI);
    }
}
