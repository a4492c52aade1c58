//! Vote delegation: lend your weight to another account's identity.
//!
//! Each account has at most one outgoing edge; the latest `delegate` call
//! overwrites the previous one. Delegating to yourself clears the edge.
//!
//! Resolution follows exactly one hop. If A delegates to B and B delegates
//! to C, A's ballot is credited to B. Chains and cycles are therefore
//! harmless and are not validated.
//!
//! Every delegation change bumps a per-account nonce. Nothing consumes the
//! nonce yet; it is kept so off-chain delegation messages can be bound to it.

use crate::error::GovernanceError;
use civic_types::AccountId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DelegationRegistry {
    /// Delegator → delegate.
    edges: HashMap<AccountId, AccountId>,
    /// Delegation change counter per account.
    nonces: HashMap<AccountId, u64>,
    /// Delegate → direct delegators. Derived from `edges`.
    #[serde(skip)]
    reverse: HashMap<AccountId, HashSet<AccountId>>,
}

impl DelegationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `account`'s edge at `delegatee` and bump its nonce.
    ///
    /// Returns the new nonce. On overflow nothing changes.
    pub fn delegate(
        &mut self,
        account: &AccountId,
        delegatee: &AccountId,
    ) -> Result<u64, GovernanceError> {
        let nonce = self
            .nonce(account)
            .checked_add(1)
            .ok_or(GovernanceError::Overflow)?;

        if let Some(old) = self.edges.remove(account) {
            self.unlink(account, &old);
        }
        if account != delegatee {
            self.edges.insert(account.clone(), delegatee.clone());
            self.reverse
                .entry(delegatee.clone())
                .or_default()
                .insert(account.clone());
        }
        self.nonces.insert(account.clone(), nonce);
        Ok(nonce)
    }

    /// The identity whose weight a ballot from `account` counts under.
    pub fn resolve(&self, account: &AccountId) -> AccountId {
        self.edges
            .get(account)
            .unwrap_or(account)
            .clone()
    }

    /// The direct delegate of `account`, if any.
    pub fn delegate_of(&self, account: &AccountId) -> Option<&AccountId> {
        self.edges.get(account)
    }

    /// Accounts that currently delegate directly to `delegatee`, sorted.
    pub fn delegators_of(&self, delegatee: &AccountId) -> Vec<AccountId> {
        let mut delegators: Vec<AccountId> = self
            .reverse
            .get(delegatee)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        delegators.sort();
        delegators
    }

    /// Number of delegation changes `account` has made.
    pub fn nonce(&self, account: &AccountId) -> u64 {
        self.nonces.get(account).copied().unwrap_or(0)
    }

    /// Rebuild the reverse index after deserialization.
    pub(crate) fn rebuild_index(&mut self) {
        self.reverse.clear();
        for (from, to) in &self.edges {
            self.reverse
                .entry(to.clone())
                .or_default()
                .insert(from.clone());
        }
    }

    fn unlink(&mut self, from: &AccountId, to: &AccountId) {
        if let Some(set) = self.reverse.get_mut(to) {
            set.remove(from);
            if set.is_empty() {
                self.reverse.remove(to);
            }
        }
    }
}
