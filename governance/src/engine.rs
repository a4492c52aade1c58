//! Core governance engine: proposal lifecycle, delegated voting and the execution gate.
//!
//! All preconditions are checked before the first mutation, so a failed
//! call leaves no trace. The state lock is never held across a call into a
//! collaborator: `vote` reads the oracle between a check phase and a commit
//! phase, and `execute` invokes the action between validation and commit.
//! `execute` also holds the [`ReentrancyGuard`] for its whole duration, so
//! nested mutating calls are rejected rather than deadlocked.

use crate::error::GovernanceError;
use crate::event::{EventBus, GovernanceEvent};
use crate::guard::ReentrancyGuard;
use crate::proposal::{Proposal, ProposalState, TallyOutcome};
use crate::state::GovernanceState;
use civic_host::{ActionExecutor, BalanceLedger, Clock, VotingPowerOracle};
use civic_types::{
    AccountId, BlockHeight, GovernanceAction, GovernanceParams, ProposalId, StakeAmount,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

/// The host collaborators an engine consumes.
#[derive(Clone)]
pub struct Collaborators {
    pub clock: Arc<dyn Clock>,
    pub ledger: Arc<dyn BalanceLedger>,
    pub oracle: Arc<dyn VotingPowerOracle>,
    pub executor: Arc<dyn ActionExecutor>,
}

pub struct GovernanceEngine {
    account: AccountId,
    params: GovernanceParams,
    state: Mutex<GovernanceState>,
    guard: ReentrancyGuard,
    events: Arc<EventBus>,
    host: Collaborators,
}

impl GovernanceEngine {
    /// Create an engine with empty state.
    pub fn new(
        account: AccountId,
        params: GovernanceParams,
        host: Collaborators,
        events: Arc<EventBus>,
    ) -> Result<Self, GovernanceError> {
        params
            .validate()
            .map_err(|e| GovernanceError::InvalidParams(e.to_string()))?;
        Ok(Self {
            account,
            params,
            state: Mutex::new(GovernanceState::new()),
            guard: ReentrancyGuard::new(),
            events,
            host,
        })
    }

    /// Submit a new proposal. Voting opens immediately.
    pub fn propose(
        &self,
        proposer: &AccountId,
        action: &GovernanceAction,
        description: impl Into<String>,
    ) -> Result<ProposalId, GovernanceError> {
        self.guard.ensure_idle()?;

        let balance = self.host.ledger.balance_of(proposer)?;
        if balance < self.params.proposal_threshold {
            return Err(GovernanceError::InsufficientStake {
                have: balance,
                need: self.params.proposal_threshold,
            });
        }
        let payload = action.encode()?;
        let start_block = self.host.clock.current_block();
        let end_block = start_block
            .checked_add(self.params.voting_period)
            .ok_or(GovernanceError::Overflow)?;

        let id = self.lock_state()?.proposals.append(
            proposer.clone(),
            payload,
            description.into(),
            start_block,
            end_block,
        );

        info!(
            %id,
            proposer = %proposer,
            %start_block,
            %end_block,
            actions = action.leaf_count(),
            "proposal created"
        );
        self.events.emit(&GovernanceEvent::ProposalCreated {
            id,
            proposer: proposer.clone(),
            start_block,
            end_block,
        });
        Ok(id)
    }

    /// Cast `caller`'s ballot on a proposal.
    ///
    /// The weight is that of the caller's *current* delegate (or the caller)
    /// at the block before voting opened. The delegation edge itself is read
    /// as of now, not as of the snapshot.
    pub fn vote(
        &self,
        caller: &AccountId,
        id: ProposalId,
        support: bool,
    ) -> Result<(), GovernanceError> {
        self.guard.ensure_idle()?;
        let now = self.host.clock.current_block();

        let (voter, snapshot) = {
            let state = self.lock_state()?;
            let proposal = state
                .proposals
                .get(id)
                .ok_or(GovernanceError::ProposalNotFound(id))?;
            match proposal.state(now, self.params.quorum) {
                ProposalState::Active => {}
                ProposalState::Pending => return Err(GovernanceError::WindowNotOpen(id)),
                _ => return Err(GovernanceError::WindowClosed(id)),
            }
            Self::check_no_ballot(&state, id, caller)?;
            (state.delegations.resolve(caller), proposal.snapshot_block())
        };

        // State lock released: the oracle may read engine state.
        let weight = match snapshot {
            Some(checkpoint) => self.host.oracle.weight_at(&voter, checkpoint)?,
            None => StakeAmount::ZERO,
        };
        if weight.is_zero() {
            return Err(GovernanceError::NoVotingPower(voter));
        }

        {
            let mut state = self.lock_state()?;
            // The oracle may have cast this caller's ballot in the meantime.
            Self::check_no_ballot(&state, id, caller)?;
            state
                .proposals
                .get_mut(id)
                .ok_or(GovernanceError::ProposalNotFound(id))?
                .add_votes(support, weight)?;
            state.ballots.record(id, caller.clone());
        }

        debug!(caller = %caller, voter = %voter, proposal = %id, support, weight = %weight, "vote cast");
        self.events.emit(&GovernanceEvent::VoteCast {
            voter,
            proposal: id,
            support,
            weight,
        });
        Ok(())
    }

    /// Point `account`'s voting identity at `delegatee`.
    ///
    /// Delegating to yourself clears the delegation.
    pub fn delegate(
        &self,
        account: &AccountId,
        delegatee: &AccountId,
    ) -> Result<(), GovernanceError> {
        self.guard.ensure_idle()?;
        let nonce = self.lock_state()?.delegations.delegate(account, delegatee)?;

        debug!(account = %account, delegatee = %delegatee, nonce, "delegation set");
        self.events.emit(&GovernanceEvent::DelegationSet {
            account: account.clone(),
            delegatee: delegatee.clone(),
            nonce,
        });
        Ok(())
    }

    /// Apply a succeeded proposal's action once its delay has elapsed.
    ///
    /// On executor failure nothing is recorded and the call may be retried;
    /// whether a retry double-applies effects is up to the action.
    pub fn execute(&self, id: ProposalId) -> Result<(), GovernanceError> {
        let _token = self.guard.enter().map_err(|e| {
            warn!(proposal = %id, "reentrant execute rejected");
            e
        })?;
        let now = self.host.clock.current_block();

        let action = {
            let state = self.lock_state()?;
            let proposal = state
                .proposals
                .get(id)
                .ok_or(GovernanceError::ProposalNotFound(id))?;
            self.check_executable(proposal, now)?;
            proposal.action()?
        };

        // State lock released: the action may read engine state.
        if let Err(e) = self.host.executor.invoke_action(&action) {
            warn!(proposal = %id, error = %e, "action execution failed");
            return Err(GovernanceError::ActionExecutionFailed(e.to_string()));
        }

        let mut state = self.lock_state().map_err(|e| {
            error!(proposal = %id, "action applied but state lock poisoned; proposal not marked executed");
            e
        })?;
        state
            .proposals
            .get_mut(id)
            .ok_or(GovernanceError::ProposalNotFound(id))?
            .executed = true;
        drop(state);

        info!(proposal = %id, block = %now, "proposal executed");
        self.events.emit(&GovernanceEvent::ProposalExecuted { id });
        Ok(())
    }

    fn check_no_ballot(
        state: &GovernanceState,
        id: ProposalId,
        caller: &AccountId,
    ) -> Result<(), GovernanceError> {
        if state.ballots.has_voted(id, caller) {
            return Err(GovernanceError::DuplicateBallot {
                proposal: id,
                voter: caller.clone(),
            });
        }
        Ok(())
    }

    fn check_executable(
        &self,
        proposal: &Proposal,
        now: BlockHeight,
    ) -> Result<(), GovernanceError> {
        let executable_at = proposal.executable_at(self.params.execution_delay);
        if now < executable_at {
            return Err(GovernanceError::DelayNotElapsed {
                executable_at: executable_at.as_u64(),
            });
        }
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted(proposal.id));
        }
        match proposal.outcome(self.params.quorum) {
            TallyOutcome::Passed => Ok(()),
            TallyOutcome::QuorumNotMet => Err(GovernanceError::QuorumNotMet {
                have: proposal.total_votes(),
                need: self.params.quorum,
            }),
            TallyOutcome::Rejected => Err(GovernanceError::ProposalRejected {
                for_votes: proposal.for_votes,
                against_votes: proposal.against_votes,
            }),
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// The engine's own identity.
    pub fn governance_account(&self) -> &AccountId {
        &self.account
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn proposal(&self, id: ProposalId) -> Result<Proposal, GovernanceError> {
        self.lock_state()?
            .proposals
            .get(id)
            .cloned()
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    /// Lifecycle state of a proposal as of the current block.
    pub fn proposal_state(&self, id: ProposalId) -> Result<ProposalState, GovernanceError> {
        let now = self.host.clock.current_block();
        self.lock_state()?
            .proposals
            .get(id)
            .map(|p| p.state(now, self.params.quorum))
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    pub fn proposal_count(&self) -> Result<usize, GovernanceError> {
        Ok(self.lock_state()?.proposals.len())
    }

    pub fn has_voted(&self, id: ProposalId, account: &AccountId) -> Result<bool, GovernanceError> {
        Ok(self.lock_state()?.ballots.has_voted(id, account))
    }

    /// The identity a ballot from `account` would be credited to right now.
    pub fn resolve_voter(&self, account: &AccountId) -> Result<AccountId, GovernanceError> {
        Ok(self.lock_state()?.delegations.resolve(account))
    }

    pub fn delegate_of(&self, account: &AccountId) -> Result<Option<AccountId>, GovernanceError> {
        Ok(self.lock_state()?.delegations.delegate_of(account).cloned())
    }

    pub fn delegators_of(&self, delegatee: &AccountId) -> Result<Vec<AccountId>, GovernanceError> {
        Ok(self.lock_state()?.delegations.delegators_of(delegatee))
    }

    pub fn delegation_nonce(&self, account: &AccountId) -> Result<u64, GovernanceError> {
        Ok(self.lock_state()?.delegations.nonce(account))
    }

    // ── Persistence ─────────────────────────────────────────────────────

    /// Serialize proposals, ballots and delegations.
    pub fn save_state(&self) -> Result<Vec<u8>, GovernanceError> {
        self.lock_state()?.to_bytes()
    }

    /// Replace the current state with a saved one.
    pub fn restore_state(&self, data: &[u8]) -> Result<(), GovernanceError> {
        self.guard.ensure_idle()?;
        let restored = GovernanceState::from_bytes(data)?;
        let count = restored.proposals.len();
        *self.lock_state()? = restored;
        info!(proposals = count, "governance state restored");
        Ok(())
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, GovernanceState>, GovernanceError> {
        self.state.lock().map_err(|_| GovernanceError::StatePoisoned)
    }
}
