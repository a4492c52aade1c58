use civic_host::HostError;
use civic_types::{AccountId, ProposalId, StakeAmount, TypesError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("insufficient stake to propose: have {have}, need {need}")]
    InsufficientStake { have: StakeAmount, need: StakeAmount },

    #[error("voting on proposal {0} has not opened yet")]
    WindowNotOpen(ProposalId),

    #[error("voting on proposal {0} has closed")]
    WindowClosed(ProposalId),

    #[error("{voter} has already cast a ballot on proposal {proposal}")]
    DuplicateBallot { proposal: ProposalId, voter: AccountId },

    #[error("{0} has no voting power at the proposal snapshot")]
    NoVotingPower(AccountId),

    #[error("execution delay has not elapsed: executable at block {executable_at}")]
    DelayNotElapsed { executable_at: u64 },

    #[error("proposal {0} has already been executed")]
    AlreadyExecuted(ProposalId),

    #[error("quorum not met: {have} < {need}")]
    QuorumNotMet { have: StakeAmount, need: StakeAmount },

    #[error("proposal rejected: {for_votes} for vs {against_votes} against")]
    ProposalRejected {
        for_votes: StakeAmount,
        against_votes: StakeAmount,
    },

    #[error("action execution failed: {0}")]
    ActionExecutionFailed(String),

    #[error("{account} is not authorized to {operation}")]
    Unauthorized {
        account: AccountId,
        operation: &'static str,
    },

    #[error("reentrant call rejected while an action is executing")]
    ReentrancyDetected,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("host collaborator error: {0}")]
    Host(#[from] HostError),

    #[error("action payload error: {0}")]
    Payload(#[from] TypesError),

    #[error("invalid governance parameters: {0}")]
    InvalidParams(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("governance state lock poisoned")]
    StatePoisoned,
}
