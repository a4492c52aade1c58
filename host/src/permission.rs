//! Role-based permission registry.

use crate::HostError;
use civic_types::{AccountId, Role};

/// Trait for the host's permission registry.
///
/// `set_permission` is the single mutation entry point. The governance crate
/// only reaches it through its admin surface, which requires the caller to
/// already hold a role-managing role.
pub trait PermissionRegistry: Send + Sync {
    /// Whether `account` currently holds `role`.
    fn has_permission(&self, account: &AccountId, role: Role) -> Result<bool, HostError>;

    /// Grant (`granted = true`) or revoke `role` for `account`.
    fn set_permission(&self, account: &AccountId, role: Role, granted: bool)
        -> Result<(), HostError>;
}
