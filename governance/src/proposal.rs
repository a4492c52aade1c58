//! Governance proposals, their lifecycle, and the append-only proposal store.

use crate::error::GovernanceError;
use civic_types::{AccountId, BlockHeight, GovernanceAction, ProposalId, StakeAmount};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a proposal, evaluated lazily against the current block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    /// Voting has not opened yet (`now < start_block`).
    Pending,
    /// Ballots are accepted (`start_block <= now < end_block`).
    Active,
    /// Voting closed without reaching quorum or a strict majority. Terminal.
    Defeated,
    /// Voting closed with quorum and a strict majority; awaiting execution.
    Succeeded,
    /// The action has been applied. Terminal.
    Executed,
}

/// Result of checking a closed tally against quorum and majority.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TallyOutcome {
    Passed,
    QuorumNotMet,
    /// Quorum reached but `for_votes <= against_votes`. Ties land here.
    Rejected,
}

/// A governance proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposer: AccountId,
    /// Block at which the proposal was created; voting opens here.
    pub start_block: BlockHeight,
    /// First block at which voting is closed. Always `> start_block`.
    pub end_block: BlockHeight,
    /// Encoded [`GovernanceAction`] applied on successful execution.
    pub action_payload: Vec<u8>,
    pub for_votes: StakeAmount,
    pub against_votes: StakeAmount,
    pub executed: bool,
    pub description: String,
}

impl Proposal {
    /// Block whose weights every ballot on this proposal is measured at.
    ///
    /// `None` for proposals created at genesis: no history exists before
    /// block zero, so nobody has weight.
    pub fn snapshot_block(&self) -> Option<BlockHeight> {
        self.start_block.checked_sub(1)
    }

    /// Earliest block at which `execute` may succeed.
    pub fn executable_at(&self, execution_delay: u64) -> BlockHeight {
        self.end_block.saturating_add(execution_delay)
    }

    pub fn total_votes(&self) -> StakeAmount {
        self.for_votes.saturating_add(self.against_votes)
    }

    /// Quorum first, then strict majority.
    pub fn outcome(&self, quorum: StakeAmount) -> TallyOutcome {
        if self.total_votes() < quorum {
            TallyOutcome::QuorumNotMet
        } else if self.for_votes > self.against_votes {
            TallyOutcome::Passed
        } else {
            TallyOutcome::Rejected
        }
    }

    pub fn state(&self, now: BlockHeight, quorum: StakeAmount) -> ProposalState {
        if self.executed {
            ProposalState::Executed
        } else if now < self.start_block {
            ProposalState::Pending
        } else if now < self.end_block {
            ProposalState::Active
        } else if self.outcome(quorum) == TallyOutcome::Passed {
            ProposalState::Succeeded
        } else {
            ProposalState::Defeated
        }
    }

    /// Decode the stored action.
    pub fn action(&self) -> Result<GovernanceAction, GovernanceError> {
        Ok(GovernanceAction::decode(&self.action_payload)?)
    }

    /// Add `weight` to the chosen side. Leaves the tally untouched on overflow.
    pub(crate) fn add_votes(
        &mut self,
        support: bool,
        weight: StakeAmount,
    ) -> Result<(), GovernanceError> {
        let side = if support {
            &mut self.for_votes
        } else {
            &mut self.against_votes
        };
        *side = side.checked_add(weight).ok_or(GovernanceError::Overflow)?;
        Ok(())
    }
}

/// The ordered, append-only collection of proposals.
///
/// A proposal's id is its index; proposals are never removed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProposalStore {
    proposals: Vec<Proposal>,
}

impl ProposalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new proposal with an empty tally and return its id.
    pub fn append(
        &mut self,
        proposer: AccountId,
        action_payload: Vec<u8>,
        description: String,
        start_block: BlockHeight,
        end_block: BlockHeight,
    ) -> ProposalId {
        debug_assert!(end_block > start_block);
        let id = ProposalId::new(self.proposals.len() as u64);
        self.proposals.push(Proposal {
            id,
            proposer,
            start_block,
            end_block,
            action_payload,
            for_votes: StakeAmount::ZERO,
            against_votes: StakeAmount::ZERO,
            executed: false,
            description,
        });
        id
    }

    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        usize::try_from(id.index())
            .ok()
            .and_then(|i| self.proposals.get(i))
    }

    pub(crate) fn get_mut(&mut self, id: ProposalId) -> Option<&mut Proposal> {
        let index = usize::try_from(id.index()).ok()?;
        self.proposals.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// Check what `append` guarantees for every stored proposal: the id
    /// equals the index and the window is non-empty.
    pub(crate) fn verify(&self) -> Result<(), String> {
        for (index, p) in self.proposals.iter().enumerate() {
            if p.id.index() != index as u64 {
                return Err(format!("proposal at position {index} carries id {}", p.id));
            }
            if p.end_block <= p.start_block {
                return Err(format!(
                    "proposal {} ends at {} but starts at {}",
                    p.id, p.end_block, p.start_block
                ));
            }
        }
        Ok(())
    }
}
