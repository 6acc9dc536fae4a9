//! Pari-mutuel redemption math.
//!
//! ```text
//! payout = floor(stake * combined_pool / winning_pool)
//! ```
//!
//! For example, with 0.995 staked on the winning side, a winning pool of 0.995
//! and a combined pool of 2.985, the sole winner receives the full 2.985.

use alloy_primitives::U256;

use super::money::Amount;

/// Payout owed to a participant holding `stake` on the winning side.
///
/// Returns zero when there is nothing to pay out. The product is computed in
/// 256 bits, and since `stake <= winning_pool` the result never exceeds
/// `combined_pool`.
#[must_use]
pub fn payout(stake: Amount, winning_pool: Amount, combined_pool: Amount) -> Amount {
    if stake == 0 || winning_pool == 0 {
        return 0;
    }
    let share = U256::from(stake) * U256::from(combined_pool) / U256::from(winning_pool);
    share.saturating_to::<u128>()
}
