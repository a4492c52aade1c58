//! Nullable infrastructure for deterministic testing.
//!
//! Every host collaborator the governance core consumes (clock, balance
//! ledger, voting-power oracle, permission registry, action executor) is
//! abstracted behind a trait in `civic-host`. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Can be told to fail, to exercise abort paths
//!
//! Usage: swap real implementations for nullables in tests and simulations.

pub mod clock;
pub mod executor;
pub mod ledger;
pub mod permissions;

pub use clock::NullClock;
pub use executor::NullExecutor;
pub use ledger::NullLedger;
pub use permissions::NullPermissions;
