//! Permission roles understood by the administrative surface.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A role an account may hold in the permission registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Root authority and the only role the admin setters accept. Held by
    /// the governance account itself, so every privileged change has to go
    /// through an executed proposal.
    Governance,
    /// Marks operators of the host's reserve module. Confers nothing on the
    /// admin surface; it is granted and revoked through proposals.
    ReserveManager,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Governance => "governance",
            Role::ReserveManager => "reserve_manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
