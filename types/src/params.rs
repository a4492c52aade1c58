//! Governance parameters and the administrative values they guard.

use crate::amount::StakeAmount;
use crate::error::TypesError;
use serde::{Deserialize, Serialize};

/// Values that only privileged callers may change.
///
/// These are plain state holders; the core attaches no behaviour to them
/// beyond permission-gated writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GovernableParam {
    ReserveTarget,
    ReserveFloor,
    ReserveCeiling,
}

impl GovernableParam {
    pub const ALL: [GovernableParam; 3] = [
        GovernableParam::ReserveTarget,
        GovernableParam::ReserveFloor,
        GovernableParam::ReserveCeiling,
    ];

    /// Human-readable name of this parameter.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReserveTarget => "reserve_target",
            Self::ReserveFloor => "reserve_floor",
            Self::ReserveCeiling => "reserve_ceiling",
        }
    }
}

/// Fixed thresholds and windows of the proposal lifecycle.
///
/// All durations are in blocks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Minimum current balance a proposer must hold.
    pub proposal_threshold: StakeAmount,

    /// Minimum combined for + against weight before a proposal may execute.
    pub quorum: StakeAmount,

    /// Length of the voting window. Must be non-zero so that
    /// `end_block > start_block` holds for every proposal.
    pub voting_period: u64,

    /// Blocks between the close of voting and execution eligibility.
    pub execution_delay: u64,
}

impl GovernanceParams {
    /// Production defaults: ~2.4 days of voting and ~19 hours of delay at
    /// 12-second blocks.
    pub fn mainnet_defaults() -> Self {
        Self {
            proposal_threshold: StakeAmount::new(10_000),
            quorum: StakeAmount::new(20_000),
            voting_period: 17_280,
            execution_delay: 5_760,
        }
    }

    /// Short windows for local development and simulation.
    pub fn devnet_defaults() -> Self {
        Self {
            voting_period: 20,
            execution_delay: 5,
            ..Self::mainnet_defaults()
        }
    }

    /// Reject parameter sets that would break lifecycle invariants.
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.voting_period == 0 {
            return Err(TypesError::InvalidParams(
                "voting_period must be at least one block".into(),
            ));
        }
        if self.quorum.is_zero() {
            return Err(TypesError::InvalidParams("quorum must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self::mainnet_defaults()
    }
}
