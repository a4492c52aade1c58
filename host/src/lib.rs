//! Abstract host collaborators for the governance engine.
//!
//! The balance ledger, the historical voting-power oracle, the permission
//! registry, the action executor and the block clock all live outside the
//! core. Every host (on-chain runtime, simulator, in-memory nullables for
//! testing) implements these traits; the core depends only on the traits.
//!
//! Calls are synchronous. An `Err` from any collaborator aborts the whole
//! governance operation that made the call.

pub mod clock;
pub mod error;
pub mod executor;
pub mod ledger;
pub mod permission;

pub use clock::Clock;
pub use error::HostError;
pub use executor::ActionExecutor;
pub use ledger::{BalanceLedger, VotingPowerOracle};
pub use permission::PermissionRegistry;
