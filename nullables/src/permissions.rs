//! Nullable permission registry.

use civic_host::{HostError, PermissionRegistry};
use civic_types::{AccountId, Role};
use std::collections::HashSet;
use std::sync::Mutex;

/// An in-memory role set.
pub struct NullPermissions {
    grants: Mutex<HashSet<(AccountId, Role)>>,
}

impl NullPermissions {
    pub fn new() -> Self {
        Self {
            grants: Mutex::new(HashSet::new()),
        }
    }

    /// All current grants, sorted for stable assertions.
    pub fn grants(&self) -> Vec<(AccountId, Role)> {
        let mut grants: Vec<_> = self.grants.lock().unwrap().iter().cloned().collect();
        grants.sort();
        grants
    }
}

impl Default for NullPermissions {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionRegistry for NullPermissions {
    fn has_permission(&self, account: &AccountId, role: Role) -> Result<bool, HostError> {
        Ok(self
            .grants
            .lock()
            .unwrap()
            .contains(&(account.clone(), role)))
    }

    fn set_permission(
        &self,
        account: &AccountId,
        role: Role,
        granted: bool,
    ) -> Result<(), HostError> {
        let mut grants = self.grants.lock().unwrap();
        if granted {
            grants.insert((account.clone(), role));
        } else {
            grants.remove(&(account.clone(), role));
        }
        Ok(())
    }
}
