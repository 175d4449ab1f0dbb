//! Core plumbing for devdash
//!
//! A Redux/Elm-style loop for terminal dashboards, plus the fetch
//! lifecycle that every card uses to load remote data.
//!
//! # Core Concepts
//!
//! - **Action**: events describing state changes
//! - **EffectStore**: state container whose reducer returns effects
//! - **Fetch**: per-card Idle/Loading/Success/Error state with
//!   generation-stamped cycles, so superseded results are discarded
//! - **TaskManager**: keyed async tasks; a new task aborts the old one
//! - **Subscriptions**: interval timers that emit actions
//! - **Component**: pure UI elements that render from props
//!
//! # Async pattern
//!
//! 1. An intent action (`GithubUsernameSet`) reaches the reducer, which
//!    calls [`Fetch::set_key`] and returns an effect carrying the [`Cycle`].
//! 2. The effect handler spawns a task under the card's [`TaskKey`].
//! 3. The task sends back a result action (`GithubDidLoad`) stamped with
//!    the cycle's [`Generation`]; the reducer resolves it, and stale
//!    generations are dropped.

pub mod action;
pub mod component;
pub mod effect;
pub mod event;
pub mod fetch;
pub mod runtime;
pub mod store;
pub mod subscriptions;
pub mod tasks;
pub mod testing;

pub use action::Action;
pub use component::Component;
pub use effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};
pub use event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
pub use fetch::{Cycle, Fetch, FetchState, Generation, Resolution, TriggerKey};
pub use runtime::{EffectContext, EffectRuntime, EffectStoreLike, EventOutcome};
pub use store::{LoggingMiddleware, Middleware};
pub use subscriptions::{SubKey, Subscriptions};
pub use tasks::{TaskKey, TaskManager};

