//! Per-proposal ballot ledger.
//!
//! Ballots are keyed by the calling account, not by the identity the
//! weight is credited to. A delegator and its delegate therefore each get
//! their own ballot on the same proposal.

use civic_types::{AccountId, ProposalId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BallotLedger {
    cast: HashMap<ProposalId, HashSet<AccountId>>,
}

impl BallotLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_voted(&self, proposal: ProposalId, voter: &AccountId) -> bool {
        self.cast
            .get(&proposal)
            .is_some_and(|voters| voters.contains(voter))
    }

    /// Record a ballot. Returns `false` if one already existed.
    pub fn record(&mut self, proposal: ProposalId, voter: AccountId) -> bool {
        self.cast.entry(proposal).or_default().insert(voter)
    }

    /// Proposals that have at least one ballot recorded.
    pub(crate) fn proposals(&self) -> impl Iterator<Item = ProposalId> + '_ {
        self.cast.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_ballot_per_pair() {
        let mut ledger = BallotLedger::new();
        let alice = AccountId::new("alice");
        let p0 = ProposalId::new(0);
        let p1 = ProposalId::new(1);

        assert!(!ledger.has_voted(p0, &alice));
        assert!(ledger.record(p0, alice.clone()));
        assert!(!ledger.record(p0, alice.clone()));
        assert!(ledger.has_voted(p0, &alice));

        // Other proposals are independent.
        assert!(!ledger.has_voted(p1, &alice));
        assert!(ledger.record(p1, alice.clone()));
        assert!(!ledger.has_voted(ProposalId::new(9), &alice));

        let mut touched: Vec<_> = ledger.proposals().collect();
        touched.sort();
        assert_eq!(touched, vec![p0, p1]);
    }
}
