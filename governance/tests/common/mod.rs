//! Shared wiring for the integration tests: an engine on top of nullables.

#![allow(dead_code)]

use civic_governance::{Collaborators, EventBus, GovernanceEngine, GovernanceEvent};
use civic_host::ActionExecutor;
use civic_nullables::{NullClock, NullExecutor, NullLedger};
use civic_types::{
    AccountId, BlockHeight, GovernableParam, GovernanceAction, GovernanceParams, StakeAmount,
};
use std::sync::{Arc, Mutex};

pub const START: u64 = 1_000;
pub const VOTING_PERIOD: u64 = 100;
pub const EXECUTION_DELAY: u64 = 20;

pub struct Env {
    pub clock: Arc<NullClock>,
    pub ledger: Arc<NullLedger>,
    pub engine: Arc<GovernanceEngine>,
    pub events: Arc<Mutex<Vec<GovernanceEvent>>>,
}

impl Env {
    /// Move the clock to the first block at which proposals created at
    /// `START` become executable.
    pub fn skip_to_executable(&self) {
        self.clock.set(START + VOTING_PERIOD + EXECUTION_DELAY);
    }

    pub fn events(&self) -> Vec<GovernanceEvent> {
        self.events.lock().unwrap().clone()
    }
}

pub fn account(name: &str) -> AccountId {
    AccountId::new(name)
}

pub fn params() -> GovernanceParams {
    GovernanceParams {
        proposal_threshold: StakeAmount::new(10_000),
        quorum: StakeAmount::new(20_000),
        voting_period: VOTING_PERIOD,
        execution_delay: EXECUTION_DELAY,
    }
}

pub fn set_target(value: u128) -> GovernanceAction {
    GovernanceAction::SetParameter {
        param: GovernableParam::ReserveTarget,
        value,
    }
}

/// Engine at block `START`, with `proposer` able to propose, and a
/// recording executor unless one is supplied.
pub fn env_with_executor(executor: Arc<dyn ActionExecutor>) -> Env {
    let clock = Arc::new(NullClock::new(START));
    let ledger = Arc::new(NullLedger::new());
    ledger.set_balance(&account("proposer"), 10_000);

    let bus = Arc::new(EventBus::new());
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    bus.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    let host = Collaborators {
        clock: clock.clone(),
        ledger: ledger.clone(),
        oracle: ledger.clone(),
        executor,
    };
    let engine = GovernanceEngine::new(account("governance"), params(), host, bus).unwrap();
    Env {
        clock,
        ledger,
        engine: Arc::new(engine),
        events,
    }
}

pub fn env() -> (Env, Arc<NullExecutor>) {
    let executor = Arc::new(NullExecutor::new());
    (env_with_executor(executor.clone()), executor)
}

/// Give `name` `weight` as of the block before `START`.
pub fn give_weight(env: &Env, name: &str, weight: u128) {
    env.ledger
        .set_weight(&account(name), BlockHeight::new(START - 1), weight);
}
