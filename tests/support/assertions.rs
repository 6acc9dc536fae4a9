use consensus_market::application::PredictionMarket;
use consensus_market::domain::Amount;

/// Escrow must cover live pools plus unwithdrawn fees minus paid winnings.
/// Anything beyond that is surplus.
pub fn assert_escrow_balanced(market: &PredictionMarket) {
    let snapshot = market.snapshot();
    let owed: Amount =
        snapshot.total_yes_pool + snapshot.total_no_pool + snapshot.fees_accrued - snapshot.paid_out;
    let escrow = market.escrow_balance();
    assert!(escrow >= owed, "escrow short of books: {escrow} < {owed}, {snapshot:?}");
    assert_eq!(market.escrow_surplus(), escrow - owed);
    market.audit().expect("audit passes");
}
