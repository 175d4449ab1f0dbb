//! Middleware hooks around dispatch

use crate::Action;

/// Intercepts actions before and after the reducer runs.
pub trait Middleware<A: Action> {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &A);

    /// Called after the reducer processed the action
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Logs every dispatched action through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Log before dispatch
    pub log_before: bool,
    /// Log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Log after dispatch only
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                state_changed = state_changed,
                "Action processed"
            );
        }
    }
}
