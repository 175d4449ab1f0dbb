//! Action trait for state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions are:
/// - Clone: they may be logged or replayed
/// - Debug: for logging
/// - Send + 'static: async tasks send them back across threads
pub trait Action: Clone + Debug + Send + 'static {
    /// Action name used in logs
    fn name(&self) -> &'static str;
}
