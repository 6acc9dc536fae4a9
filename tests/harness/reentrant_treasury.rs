use std::sync::{Arc, Mutex, OnceLock};

use consensus_market::adapter::outbound::InMemoryTreasury;
use consensus_market::application::PredictionMarket;
use consensus_market::domain::{Address, Amount, LedgerError, TransferError};
use consensus_market::port::Treasury;

/// A call the treasury makes back into the market while paying `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    Redeem,
    WithdrawFees,
    Audit,
}

/// In-memory treasury that, after crediting a hooked recipient, calls back
/// into the market the way a malicious receiving contract would.
#[derive(Default)]
pub struct ReentrantTreasury {
    inner: InMemoryTreasury,
    market: OnceLock<Arc<PredictionMarket>>,
    hooks: Mutex<Vec<(Address, Hook)>>,
    outcomes: Mutex<Vec<(Hook, Result<(), LedgerError>)>>,
}

impl ReentrantTreasury {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&self, account: Address, amount: Amount) {
        self.inner.mint(account, amount).expect("mint");
    }

    pub fn attach(&self, market: Arc<PredictionMarket>) {
        assert!(self.market.set(market).is_ok(), "market already attached");
    }

    pub fn hook(&self, recipient: Address, hook: Hook) {
        self.hooks.lock().expect("lock hooks").push((recipient, hook));
    }

    /// Results of every nested call attempted so far.
    pub fn outcomes(&self) -> Vec<(Hook, Result<(), LedgerError>)> {
        self.outcomes.lock().expect("lock outcomes").clone()
    }
}

impl Treasury for ReentrantTreasury {
    fn balance_of(&self, account: &Address) -> Amount {
        self.inner.balance_of(account)
    }

    fn transfer(&self, from: Address, to: Address, amount: Amount) -> Result<(), TransferError> {
        self.inner.transfer(from, to, amount)?;

        let hooks: Vec<Hook> = self
            .hooks
            .lock()
            .expect("lock hooks")
            .iter()
            .filter(|(recipient, _)| *recipient == to)
            .map(|(_, hook)| *hook)
            .collect();
        let Some(market) = self.market.get() else {
            return Ok(());
        };
        for hook in hooks {
            let result = match hook {
                Hook::Redeem => market.redeem(to).map(|_| ()),
                Hook::WithdrawFees => market.withdraw_fees(to).map(|_| ()),
                Hook::Audit => market.audit(),
            };
            self.outcomes.lock().expect("lock outcomes").push((hook, result));
        }
        Ok(())
    }
}
