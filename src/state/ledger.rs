use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Read access to token balances
pub trait BalanceLedger {
    fn balance_of(&self, asset: Address, holder: Address) -> U256;
}

/// Balance of one holder for one asset at a point in time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub asset: Address,
    pub holder: Address,
    pub amount: U256,
}

impl BalanceSnapshot {
    pub fn take<L: BalanceLedger + ?Sized>(ledger: &L, asset: Address, holder: Address) -> Self {
        Self { asset, holder, amount: ledger.balance_of(asset, holder) }
    }

    /// Re-read the same (asset, holder) pair
    pub fn retake<L: BalanceLedger + ?Sized>(&self, ledger: &L) -> Self {
        Self::take(ledger, self.asset, self.holder)
    }

    /// How much the balance grew between `self` and `later`. `None` if it shrank.
    pub fn gain(&self, later: &BalanceSnapshot) -> Option<U256> {
        later.amount.checked_sub(self.amount)
    }

    /// How much the balance shrank between `self` and `later`, zero if it grew
    pub fn loss(&self, later: &BalanceSnapshot) -> U256 {
        self.amount.saturating_sub(later.amount)
    }
}
