//! Actions a proposal can carry.
//!
//! Each variant is one administrative capability. The executor interprets
//! the variant directly; there is no open-ended dispatch on the payload.

use crate::account::AccountId;
use crate::error::TypesError;
use crate::params::GovernableParam;
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// The side effect an approved proposal applies when executed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceAction {
    /// Overwrite a governable parameter.
    SetParameter { param: GovernableParam, value: u128 },
    /// Grant `role` to `account`.
    GrantRole { account: AccountId, role: Role },
    /// Revoke `role` from `account`.
    RevokeRole { account: AccountId, role: Role },
    /// Apply several actions in order.
    Batch(Vec<GovernanceAction>),
}

impl GovernanceAction {
    /// Encode into the opaque payload stored on a proposal.
    pub fn encode(&self) -> Result<Vec<u8>, TypesError> {
        bincode::serialize(self).map_err(|e| TypesError::ActionEncode(e.to_string()))
    }

    /// Decode a payload produced by [`encode`](Self::encode).
    pub fn decode(payload: &[u8]) -> Result<Self, TypesError> {
        bincode::deserialize(payload).map_err(|e| TypesError::ActionDecode(e.to_string()))
    }

    /// Number of leaf actions, counting through nested batches.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Batch(actions) => actions.iter().map(Self::leaf_count).sum(),
            _ => 1,
        }
    }
}
