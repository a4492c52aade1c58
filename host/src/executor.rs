//! Boundary for applying an approved proposal's action.

use crate::HostError;
use civic_types::GovernanceAction;

/// Performs the side effect encoded in an approved proposal.
///
/// Called at most once per successful `execute`. Implementations may call
/// back into the governance engine; the engine rejects such calls while the
/// invocation is in flight.
pub trait ActionExecutor: Send + Sync {
    fn invoke_action(&self, action: &GovernanceAction) -> Result<(), HostError>;
}
