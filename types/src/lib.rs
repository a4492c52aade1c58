//! Fundamental types for the civic governance engine.
//!
//! This crate defines the values shared by every other crate in the workspace:
//! account identifiers, stake amounts, block heights, proposal ids, roles,
//! governance parameters and the action type a proposal carries.

pub mod account;
pub mod action;
pub mod amount;
pub mod block;
pub mod error;
pub mod params;
pub mod role;

pub use account::AccountId;
pub use action::GovernanceAction;
pub use amount::StakeAmount;
pub use block::{BlockHeight, ProposalId};
pub use error::TypesError;
pub use params::{GovernableParam, GovernanceParams};
pub use role::Role;
