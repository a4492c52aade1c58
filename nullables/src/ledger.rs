//! Nullable ledger: in-memory balances and weight checkpoints.

use civic_host::{BalanceLedger, HostError, VotingPowerOracle};
use civic_types::{AccountId, BlockHeight, StakeAmount};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// An in-memory balance ledger and voting-power oracle.
///
/// Weights are stored as checkpoints: `weight_at(account, h)` returns the
/// most recent checkpoint recorded at or before `h`, or zero.
pub struct NullLedger {
    balances: Mutex<HashMap<AccountId, StakeAmount>>,
    checkpoints: Mutex<HashMap<AccountId, BTreeMap<BlockHeight, StakeAmount>>>,
    unavailable: AtomicBool,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
            checkpoints: Mutex::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Set the current balance of an account.
    pub fn set_balance(&self, account: &AccountId, amount: u128) {
        self.balances
            .lock()
            .unwrap()
            .insert(account.clone(), StakeAmount::new(amount));
    }

    /// Record `weight` for `account` effective from block `at` onwards.
    pub fn set_weight(&self, account: &AccountId, at: BlockHeight, weight: u128) {
        self.checkpoints
            .lock()
            .unwrap()
            .entry(account.clone())
            .or_default()
            .insert(at, StakeAmount::new(weight));
    }

    /// Make every lookup fail with [`HostError::Unavailable`] until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), HostError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(HostError::Unavailable("null ledger switched off".into()));
        }
        Ok(())
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceLedger for NullLedger {
    fn balance_of(&self, account: &AccountId) -> Result<StakeAmount, HostError> {
        self.check_available()?;
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(account)
            .copied()
            .unwrap_or(StakeAmount::ZERO))
    }
}

impl VotingPowerOracle for NullLedger {
    fn weight_at(
        &self,
        account: &AccountId,
        checkpoint: BlockHeight,
    ) -> Result<StakeAmount, HostError> {
        self.check_available()?;
        Ok(self
            .checkpoints
            .lock()
            .unwrap()
            .get(account)
            .and_then(|history| history.range(..=checkpoint).next_back())
            .map(|(_, weight)| *weight)
            .unwrap_or(StakeAmount::ZERO))
    }
}
