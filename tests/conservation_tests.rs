mod support;

use alloy_primitives::U256;
use consensus_market::domain::{Amount, ErrorKind, Outcome, Side};
use consensus_market::port::Treasury;
use consensus_market::testkit::domain::{ether, traders};
use consensus_market::testkit::harness::{owner, resolver, Harness};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use support::assertions::assert_escrow_balanced;

/// `floor(stake * combined / winning)` without intermediate overflow.
fn expected_payout(stake: Amount, combined: Amount, winning: Amount) -> Amount {
    let payout = U256::from(stake) * U256::from(combined) / U256::from(winning);
    payout.to::<Amount>()
}

/// Random stakes, some deliberately invalid, against a single market.
fn run_random_session(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let h = Harness::new();
    let traders = traders(6);
    h.fund(&traders, ether(50));
    let market = h.open_market("random session", 1_000);
    let supply = h.treasury.total_supply();

    for _ in 0..200 {
        let trader = traders[rng.gen_range(0..traders.len())];
        let side = if rng.gen_bool(0.5) { Side::Yes } else { Side::No };
        // zero and oversize amounts are rejected without effect
        let amount: Amount = match rng.gen_range(0..10) {
            0 => 0,
            1 => ether(100),
            _ => rng.gen_range(1..=ether(1)),
        };
        let before = market.snapshot();
        match market.stake(trader, side, amount) {
            Ok(staked) => {
                assert_eq!(staked.fee + staked.net_amount, amount);
                assert_eq!(staked.fee, amount * 50 / 10_000);
            }
            Err(err) => {
                assert!(matches!(
                    err.kind(),
                    ErrorKind::InvalidArgument | ErrorKind::Transfer
                ));
                assert_eq!(market.snapshot(), before);
            }
        }
        assert_escrow_balanced(&market);
    }

    h.close(&market);
    let outcome = if rng.gen_bool(0.5) { Outcome::Yes } else { Outcome::No };
    market.resolve(resolver(), outcome).unwrap();

    let winning = outcome.winning_side().unwrap();
    let winning_pool = market.pool(winning);
    let combined = market.total_yes_pool() + market.total_no_pool();
    let mut paid: Amount = 0;
    for trader in &traders {
        let stake = market.stake_of(trader, winning);
        match market.redeem(*trader) {
            Ok(redeemed) => {
                assert_eq!(redeemed.payout, expected_payout(stake, combined, winning_pool));
                paid += redeemed.payout;
            }
            Err(err) => {
                assert_eq!(stake, 0);
                assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            }
        }
        assert_escrow_balanced(&market);
    }
    assert!(paid <= combined);
    if winning_pool > 0 {
        // rounding loses strictly less than one unit per winner
        assert!(combined - paid < traders.len() as Amount);
    }

    if market.fees_accrued() > 0 {
        market.withdraw_fees(owner()).unwrap();
    }
    assert_eq!(market.escrow_balance(), combined - paid);
    assert_eq!(h.treasury.total_supply(), supply);
}

#[test]
fn random_sessions_conserve_funds() {
    for seed in [1, 7, 42, 1_337, 20_240_601] {
        run_random_session(seed);
    }
}
