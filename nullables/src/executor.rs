//! Nullable action executor: records invocations, fails on demand.

use civic_host::{ActionExecutor, HostError};
use civic_types::GovernanceAction;
use std::collections::VecDeque;
use std::sync::Mutex;

/// An executor that applies nothing and remembers everything.
///
/// Scripted failures are consumed in order, one per invocation; once the
/// script is empty every invocation succeeds.
pub struct NullExecutor {
    invoked: Mutex<Vec<GovernanceAction>>,
    script: Mutex<VecDeque<HostError>>,
}

impl NullExecutor {
    pub fn new() -> Self {
        Self {
            invoked: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::new()),
        }
    }

    /// Make the next invocation fail with `error`.
    pub fn fail_next(&self, error: HostError) {
        self.script.lock().unwrap().push_back(error);
    }

    /// Actions invoked so far, including failed attempts, in call order.
    pub fn invocations(&self) -> Vec<GovernanceAction> {
        self.invoked.lock().unwrap().clone()
    }
}

impl Default for NullExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionExecutor for NullExecutor {
    fn invoke_action(&self, action: &GovernanceAction) -> Result<(), HostError> {
        self.invoked.lock().unwrap().push(action.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
