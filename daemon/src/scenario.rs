//! Scenario files and their replay against an in-memory host.

use anyhow::Context;
use civic_governance::{
    AdminExecutor, AdminSurface, Collaborators, EventBus, GovernanceConfig, GovernanceEngine,
    GovernanceError, ProposalState,
};
use civic_nullables::{NullClock, NullLedger, NullPermissions};
use civic_types::{AccountId, BlockHeight, GovernableParam, GovernanceAction, ProposalId};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// A scripted governance session.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// Block height the clock starts at.
    #[serde(default = "default_start_block")]
    pub start_block: u64,
    /// Current balances, consulted for the proposal threshold.
    #[serde(default)]
    pub balances: BTreeMap<String, u128>,
    /// Voting-power checkpoints.
    #[serde(default)]
    pub weights: Vec<WeightCheckpoint>,
    pub steps: Vec<Step>,
}

fn default_start_block() -> u64 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightCheckpoint {
    pub account: String,
    pub block: u64,
    pub weight: u128,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Propose {
        proposer: String,
        action: GovernanceAction,
        #[serde(default)]
        description: String,
    },
    Vote {
        voter: String,
        proposal: ProposalId,
        support: bool,
    },
    Delegate {
        account: String,
        delegatee: String,
    },
    Advance {
        blocks: u64,
    },
    SetBlock {
        block: u64,
    },
    SetBalance {
        account: String,
        balance: u128,
    },
    SetWeight {
        #[serde(flatten)]
        checkpoint: WeightCheckpoint,
    },
    Execute {
        proposal: ProposalId,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Propose { .. } => "propose",
            Step::Vote { .. } => "vote",
            Step::Delegate { .. } => "delegate",
            Step::Advance { .. } => "advance",
            Step::SetBlock { .. } => "set_block",
            Step::SetBalance { .. } => "set_balance",
            Step::SetWeight { .. } => "set_weight",
            Step::Execute { .. } => "execute",
        }
    }
}

impl Scenario {
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Totals reported once a replay finishes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub applied: usize,
    pub failed: usize,
    pub proposals: Vec<(ProposalId, ProposalState)>,
    pub parameters: Vec<(GovernableParam, u128)>,
}

/// An engine wired to nullable collaborators and the admin surface.
pub struct Simulation {
    clock: Arc<NullClock>,
    ledger: Arc<NullLedger>,
    surface: Arc<AdminSurface>,
    engine: GovernanceEngine,
}

impl Simulation {
    pub fn new(
        config: &GovernanceConfig,
        scenario: &Scenario,
        events: Arc<EventBus>,
    ) -> anyhow::Result<Self> {
        let account = config.account();
        let clock = Arc::new(NullClock::new(scenario.start_block));
        let ledger = Arc::new(NullLedger::new());
        for (name, balance) in &scenario.balances {
            ledger.set_balance(&AccountId::new(name.as_str()), *balance);
        }
        for checkpoint in &scenario.weights {
            set_checkpoint(&ledger, checkpoint);
        }

        let surface = Arc::new(AdminSurface::new(
            &account,
            Arc::new(NullPermissions::new()),
            Arc::clone(&events),
        )?);
        let host = Collaborators {
            clock: clock.clone(),
            ledger: ledger.clone(),
            oracle: ledger.clone(),
            executor: Arc::new(AdminExecutor::new(account.clone(), Arc::clone(&surface))),
        };
        let engine = GovernanceEngine::new(account, config.params(), host, events)?;
        Ok(Self {
            clock,
            ledger,
            surface,
            engine,
        })
    }

    /// Apply every step in order.
    ///
    /// A failed step is logged and counted; with `strict` the first failure
    /// aborts the replay instead.
    pub fn run(&self, steps: &[Step], strict: bool) -> anyhow::Result<Summary> {
        let mut summary = Summary::default();
        for (index, step) in steps.iter().enumerate() {
            match self.apply(step) {
                Ok(()) => summary.applied += 1,
                Err(e) if strict => {
                    return Err(e).with_context(|| format!("step {index} ({}) failed", step.name()));
                }
                Err(e) => {
                    warn!(index, step = step.name(), error = %e, "step failed");
                    summary.failed += 1;
                }
            }
        }

        for index in 0..self.engine.proposal_count()? {
            let id = ProposalId::new(index as u64);
            summary.proposals.push((id, self.engine.proposal_state(id)?));
        }
        for param in GovernableParam::ALL {
            summary.parameters.push((param, self.surface.parameter(param)?));
        }
        info!(
            applied = summary.applied,
            failed = summary.failed,
            block = %self.clock.now(),
            "scenario finished"
        );
        Ok(summary)
    }

    pub fn apply(&self, step: &Step) -> Result<(), GovernanceError> {
        match step {
            Step::Propose {
                proposer,
                action,
                description,
            } => {
                self.engine.propose(
                    &AccountId::new(proposer.as_str()),
                    action,
                    description.as_str(),
                )?;
            }
            Step::Vote {
                voter,
                proposal,
                support,
            } => self
                .engine
                .vote(&AccountId::new(voter.as_str()), *proposal, *support)?,
            Step::Delegate { account, delegatee } => self.engine.delegate(
                &AccountId::new(account.as_str()),
                &AccountId::new(delegatee.as_str()),
            )?,
            Step::Advance { blocks } => self.clock.advance(*blocks),
            Step::SetBlock { block } => self.clock.set(*block),
            Step::SetBalance { account, balance } => self
                .ledger
                .set_balance(&AccountId::new(account.as_str()), *balance),
            Step::SetWeight { checkpoint } => set_checkpoint(&self.ledger, checkpoint),
            Step::Execute { proposal } => self.engine.execute(*proposal)?,
        }
        Ok(())
    }

    pub fn engine(&self) -> &GovernanceEngine {
        &self.engine
    }
}

fn set_checkpoint(ledger: &NullLedger, checkpoint: &WeightCheckpoint) {
    ledger.set_weight(
        &AccountId::new(checkpoint.account.as_str()),
        BlockHeight::new(checkpoint.block),
        checkpoint.weight,
    );
}
