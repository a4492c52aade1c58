//! Privileged administrative surface and the executor that drives it.
//!
//! Authority is rooted in the governance account: [`AdminSurface::new`]
//! grants it [`Role::Governance`], and every setter requires the caller to
//! hold that role. In practice that means every change goes through an
//! executed proposal, applied by [`AdminExecutor`] acting as the governance
//! account.

use crate::error::GovernanceError;
use crate::event::{EventBus, GovernanceEvent};
use civic_host::{ActionExecutor, HostError, PermissionRegistry};
use civic_types::{AccountId, GovernableParam, GovernanceAction, Role};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

pub struct AdminSurface {
    permissions: Arc<dyn PermissionRegistry>,
    values: Mutex<HashMap<GovernableParam, u128>>,
    events: Arc<EventBus>,
}

impl AdminSurface {
    /// Create the surface and make `root` the permission root.
    pub fn new(
        root: &AccountId,
        permissions: Arc<dyn PermissionRegistry>,
        events: Arc<EventBus>,
    ) -> Result<Self, GovernanceError> {
        permissions.set_permission(root, Role::Governance, true)?;
        info!(root = %root, "governance account installed as permission root");
        events.emit(&GovernanceEvent::PermissionChanged {
            account: root.clone(),
            role: Role::Governance,
            granted: true,
        });
        Ok(Self {
            permissions,
            values: Mutex::new(HashMap::new()),
            events,
        })
    }

    /// Current value of a parameter; unset parameters read as zero.
    pub fn parameter(&self, param: GovernableParam) -> Result<u128, GovernanceError> {
        let values = self.values.lock().map_err(|_| GovernanceError::StatePoisoned)?;
        Ok(values.get(&param).copied().unwrap_or(0))
    }

    /// Overwrite a parameter. Returns the previous value.
    pub fn set_parameter(
        &self,
        caller: &AccountId,
        param: GovernableParam,
        value: u128,
    ) -> Result<u128, GovernanceError> {
        self.authorize(caller, "set parameters")?;
        let old = {
            let mut values = self.values.lock().map_err(|_| GovernanceError::StatePoisoned)?;
            values.insert(param, value).unwrap_or(0)
        };
        info!(caller = %caller, param = param.name(), old = %old, new = %value, "parameter updated");
        self.events.emit(&GovernanceEvent::ParameterUpdated {
            param,
            old,
            new: value,
        });
        Ok(old)
    }

    pub fn grant_role(
        &self,
        caller: &AccountId,
        account: &AccountId,
        role: Role,
    ) -> Result<(), GovernanceError> {
        self.change_role(caller, account, role, true)
    }

    pub fn revoke_role(
        &self,
        caller: &AccountId,
        account: &AccountId,
        role: Role,
    ) -> Result<(), GovernanceError> {
        self.change_role(caller, account, role, false)
    }

    pub fn has_role(&self, account: &AccountId, role: Role) -> Result<bool, GovernanceError> {
        Ok(self.permissions.has_permission(account, role)?)
    }

    fn change_role(
        &self,
        caller: &AccountId,
        account: &AccountId,
        role: Role,
        granted: bool,
    ) -> Result<(), GovernanceError> {
        self.authorize(caller, "manage roles")?;
        self.permissions.set_permission(account, role, granted)?;
        if !granted && role == Role::Governance && account == caller {
            warn!(account = %account, "governance role revoked from its own holder");
        }
        info!(caller = %caller, account = %account, %role, granted, "permission changed");
        self.events.emit(&GovernanceEvent::PermissionChanged {
            account: account.clone(),
            role,
            granted,
        });
        Ok(())
    }

    /// Succeed if `caller` holds the governance permission.
    fn authorize(&self, caller: &AccountId, operation: &'static str) -> Result<(), GovernanceError> {
        if self.permissions.has_permission(caller, Role::Governance)? {
            return Ok(());
        }
        warn!(caller = %caller, operation, "unauthorized admin call");
        Err(GovernanceError::Unauthorized {
            account: caller.clone(),
            operation,
        })
    }
}

/// Applies approved actions to an [`AdminSurface`] as the governance account.
pub struct AdminExecutor {
    account: AccountId,
    surface: Arc<AdminSurface>,
}

impl AdminExecutor {
    pub fn new(account: AccountId, surface: Arc<AdminSurface>) -> Self {
        Self { account, surface }
    }

    fn apply(&self, action: &GovernanceAction) -> Result<(), GovernanceError> {
        match action {
            GovernanceAction::SetParameter { param, value } => {
                self.surface.set_parameter(&self.account, *param, *value)?;
            }
            GovernanceAction::GrantRole { account, role } => {
                self.surface.grant_role(&self.account, account, *role)?;
            }
            GovernanceAction::RevokeRole { account, role } => {
                self.surface.revoke_role(&self.account, account, *role)?;
            }
            // Not atomic: inner actions applied before a failure stay applied.
            GovernanceAction::Batch(actions) => {
                for inner in actions {
                    self.apply(inner)?;
                }
            }
        }
        Ok(())
    }
}

impl ActionExecutor for AdminExecutor {
    fn invoke_action(&self, action: &GovernanceAction) -> Result<(), HostError> {
        self.apply(action)
            .map_err(|e| HostError::Rejected(e.to_string()))
    }
}
