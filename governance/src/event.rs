//! Notifications emitted after governance transitions commit.

use civic_types::{AccountId, BlockHeight, GovernableParam, ProposalId, Role, StakeAmount};
use serde::Serialize;
use std::sync::RwLock;
use tracing::warn;

/// Governance-level events that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GovernanceEvent {
    ProposalCreated {
        id: ProposalId,
        proposer: AccountId,
        start_block: BlockHeight,
        end_block: BlockHeight,
    },
    /// `voter` is the identity the weight was credited to.
    VoteCast {
        voter: AccountId,
        proposal: ProposalId,
        support: bool,
        weight: StakeAmount,
    },
    DelegationSet {
        account: AccountId,
        delegatee: AccountId,
        nonce: u64,
    },
    ProposalExecuted {
        id: ProposalId,
    },
    ParameterUpdated {
        param: GovernableParam,
        old: u128,
        new: u128,
    },
    PermissionChanged {
        account: AccountId,
        role: Role,
        granted: bool,
    },
}

type Listener = Box<dyn Fn(&GovernanceEvent) + Send + Sync>;

/// Synchronous fan-out event bus.
///
/// Listeners run inline on the emitting thread after the state lock has
/// been released, so they may read engine state. They must not block.
#[derive(Default)]
pub struct EventBus {
    listeners: RwLock<Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Dropped with a warning if an earlier
    /// registration panicked and poisoned the bus.
    pub fn subscribe(&self, listener: impl Fn(&GovernanceEvent) + Send + Sync + 'static) {
        match self.listeners.write() {
            Ok(mut listeners) => listeners.push(Box::new(listener)),
            Err(_) => warn!("event bus poisoned; listener not registered"),
        }
    }

    pub fn emit(&self, event: &GovernanceEvent) {
        match self.listeners.read() {
            Ok(listeners) => {
                for listener in listeners.iter() {
                    listener(event);
                }
            }
            Err(_) => warn!(?event, "event bus poisoned; event dropped"),
        }
    }
}
