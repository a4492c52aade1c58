//! Balance and historical weight lookups.

use crate::HostError;
use civic_types::{AccountId, BlockHeight, StakeAmount};

/// The fungible balance ledger.
pub trait BalanceLedger: Send + Sync {
    /// Current balance of `account`.
    fn balance_of(&self, account: &AccountId) -> Result<StakeAmount, HostError>;
}

/// Historical stake weights.
pub trait VotingPowerOracle: Send + Sync {
    /// Weight of `account` as of the end of block `checkpoint`.
    fn weight_at(
        &self,
        account: &AccountId,
        checkpoint: BlockHeight,
    ) -> Result<StakeAmount, HostError>;
}
