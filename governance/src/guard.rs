//! Reentrancy exclusion around action execution.
//!
//! `execute` holds the guard for its whole duration, including the
//! executor call. Every other mutating operation checks the guard first,
//! so an action that calls back into the engine fails fast instead of
//! observing or corrupting a half-finished execution.

use crate::error::GovernanceError;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    entered: AtomicBool,
}

/// Releases the guard when dropped.
#[derive(Debug)]
pub struct GuardToken<'a> {
    guard: &'a ReentrancyGuard,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the guard for the lifetime of the returned token.
    pub fn enter(&self) -> Result<GuardToken<'_>, GovernanceError> {
        self.entered
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| GovernanceError::ReentrancyDetected)?;
        Ok(GuardToken { guard: self })
    }

    /// Fail if an execution is in flight.
    pub fn ensure_idle(&self) -> Result<(), GovernanceError> {
        if self.is_entered() {
            return Err(GovernanceError::ReentrancyDetected);
        }
        Ok(())
    }

    pub fn is_entered(&self) -> bool {
        self.entered.load(Ordering::Acquire)
    }
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.guard.entered.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_enter_is_rejected() {
        let guard = ReentrancyGuard::new();
        let token = guard.enter().unwrap();
        assert!(matches!(
            guard.enter(),
            Err(GovernanceError::ReentrancyDetected)
        ));
        assert!(guard.ensure_idle().is_err());
        drop(token);
        assert!(guard.ensure_idle().is_ok());
        assert!(guard.enter().is_ok());
    }

    #[test]
    fn released_on_early_return() {
        let guard = ReentrancyGuard::new();
        let failing = || -> Result<(), GovernanceError> {
            let _token = guard.enter()?;
            Err(GovernanceError::Overflow)
        };
        assert!(failing().is_err());
        assert!(!guard.is_entered());
    }
}
