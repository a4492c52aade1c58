//! The mutable governance state and its persisted form.

use crate::ballot::BallotLedger;
use crate::delegation::DelegationRegistry;
use crate::error::GovernanceError;
use crate::proposal::ProposalStore;
use serde::{Deserialize, Serialize};

/// Everything the engine mutates, owned in one place and guarded by one lock.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GovernanceState {
    pub proposals: ProposalStore,
    pub ballots: BallotLedger,
    pub delegations: DelegationRegistry,
}

impl GovernanceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the state to bytes for persistence.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GovernanceError> {
        bincode::serialize(self).map_err(|e| GovernanceError::Snapshot(e.to_string()))
    }

    /// Restore state from bytes produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(data: &[u8]) -> Result<Self, GovernanceError> {
        let mut state: Self =
            bincode::deserialize(data).map_err(|e| GovernanceError::Snapshot(e.to_string()))?;
        state.proposals.verify().map_err(GovernanceError::Snapshot)?;
        if let Some(orphan) = state
            .ballots
            .proposals()
            .find(|id| state.proposals.get(*id).is_none())
        {
            return Err(GovernanceError::Snapshot(format!(
                "ballots recorded for unknown proposal {orphan}"
            )));
        }
        state.delegations.rebuild_index();
        Ok(state)
    }
}
