//! Stake-weighted governance with delegated voting.
//!
//! Lifecycle: Pending → Active → (Succeeded | Defeated) → Executed.
//! A proposal is created by a holder whose current balance meets the
//! proposal threshold; voting opens at once and lasts a fixed number of
//! blocks. Ballots are weighted by the voter's stake one block before the
//! window opened, resolved through at most one delegation hop. After the
//! window closes and a fixed delay elapses, a proposal with quorum and a
//! strict majority may be executed exactly once.
//!
//! State is evaluated lazily from the current block; there is no ticker.

pub mod admin;
pub mod ballot;
pub mod config;
pub mod delegation;
pub mod engine;
pub mod error;
pub mod event;
pub mod guard;
pub mod proposal;
pub mod state;

pub use admin::{AdminExecutor, AdminSurface};
pub use ballot::BallotLedger;
pub use config::{ConfigError, GovernanceConfig};
pub use delegation::DelegationRegistry;
pub use engine::{Collaborators, GovernanceEngine};
pub use error::GovernanceError;
pub use event::{EventBus, GovernanceEvent};
pub use guard::{GuardToken, ReentrancyGuard};
pub use proposal::{Proposal, ProposalState, ProposalStore, TallyOutcome};
pub use state::GovernanceState;
