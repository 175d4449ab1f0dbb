//! Fetch lifecycle for keyed async loads
//!
//! A [`Fetch`] tracks one card's data: the trigger key it was asked for,
//! the current [`FetchState`], and a [`Generation`] counter. Every time a
//! new cycle starts (key changed, reload, key cleared, disposal) the
//! generation is bumped, so results stamped with an older generation can
//! be recognised and dropped.
//!
//! The controller never performs I/O itself. A reducer calls
//! [`Fetch::set_key`] or [`Fetch::reload`], gets back a [`Cycle`] when a
//! request must be issued, and hands that cycle to an effect. The effect's
//! task reports back with the cycle's generation, and the reducer feeds the
//! outcome into [`Fetch::resolve`].
//!
//! ```
//! use devdash_core::fetch::{Fetch, FetchState, Resolution};
//!
//! let mut profile: Fetch<String, u32> = Fetch::new();
//!
//! let first = profile.set_key(Some("octocat".into())).unwrap();
//! let second = profile.set_key(Some("torvalds".into())).unwrap();
//!
//! // The newer cycle wins, the older one is discarded whatever its outcome
//! assert_eq!(profile.succeed(second.generation, 2), Resolution::Applied);
//! assert_eq!(profile.succeed(first.generation, 1), Resolution::Superseded);
//! assert_eq!(profile.state(), &FetchState::Success(2));
//! ```

use std::fmt::Debug;

/// A value whose change starts a new fetch cycle.
pub trait TriggerKey: Clone + PartialEq + Debug {
    /// Blank keys never start a cycle; the fetch stays idle instead.
    fn is_blank(&self) -> bool {
        false
    }
}

impl TriggerKey for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

/// Identifies one fetch cycle. Only the latest generation may mutate state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// A started cycle: the request an effect must perform.
#[derive(Clone, Debug, PartialEq)]
pub struct Cycle<K> {
    pub generation: Generation,
    pub key: K,
}

/// Observable state of a fetch.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FetchState<T> {
    /// No key: nothing requested
    #[default]
    Idle,
    Loading,
    Success(T),
    /// Human-readable failure message
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// What happened to a completion handed to [`Fetch::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The completion belonged to the current cycle and was stored.
    Applied,
    /// The cycle was superseded or disposed; state is unchanged.
    Superseded,
}

impl Resolution {
    pub fn is_applied(self) -> bool {
        matches!(self, Resolution::Applied)
    }
}

/// Fetch lifecycle controller for one loader.
///
/// Transitions:
/// - `Idle --(key set)--> Loading`
/// - `Loading --(success)--> Success`, `Loading --(failure)--> Error`
/// - any state `--(key changed)--> Loading`, `--(key cleared)--> Idle`
#[derive(Clone, Debug)]
pub struct Fetch<K, T> {
    key: Option<K>,
    generation: Generation,
    activated: bool,
    state: FetchState<T>,
}

impl<K, T> Default for Fetch<K, T> {
    fn default() -> Self {
        Self {
            key: None,
            generation: Generation::default(),
            activated: false,
            state: FetchState::Idle,
        }
    }
}

impl<K: TriggerKey, T> Fetch<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Generation of the most recent cycle.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Set the trigger key.
    ///
    /// Returns the cycle to run when a request must start: on the first
    /// activation with a key, or whenever the key differs from the current
    /// one. Setting the same key again is a no-op. Blank keys count as
    /// absent and move the fetch to `Idle` without a request.
    pub fn set_key(&mut self, key: Option<K>) -> Option<Cycle<K>> {
        let key = key.filter(|key| !key.is_blank());
        if self.activated && key == self.key {
            return None;
        }
        self.activated = true;
        self.key = key;
        self.begin()
    }

    /// Start a fresh cycle for the current key (manual or periodic refresh).
    pub fn reload(&mut self) -> Option<Cycle<K>> {
        if self.key.is_none() {
            return None;
        }
        self.begin()
    }

    fn begin(&mut self) -> Option<Cycle<K>> {
        self.generation = self.generation.next();
        match &self.key {
            Some(key) => {
                self.state = FetchState::Loading;
                Some(Cycle {
                    generation: self.generation,
                    key: key.clone(),
                })
            }
            None => {
                self.state = FetchState::Idle;
                None
            }
        }
    }

    /// Whether a completion for `generation` would be applied.
    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.generation && self.state.is_loading()
    }

    pub fn succeed(&mut self, generation: Generation, data: T) -> Resolution {
        self.resolve(generation, Ok(data))
    }

    pub fn fail(&mut self, generation: Generation, message: impl Into<String>) -> Resolution {
        self.resolve(generation, Err(message.into()))
    }

    /// Complete a cycle. Completions from superseded cycles are dropped.
    pub fn resolve(&mut self, generation: Generation, result: Result<T, String>) -> Resolution {
        if !self.is_current(generation) {
            tracing::debug!(
                stale = generation.value(),
                current = self.generation.value(),
                "Discarding superseded fetch result"
            );
            return Resolution::Superseded;
        }
        self.state = match result {
            Ok(data) => FetchState::Success(data),
            Err(message) => FetchState::Error(message),
        };
        Resolution::Applied
    }

    /// Tear down: invalidate the active cycle and forget the key.
    pub fn dispose(&mut self) {
        self.generation = self.generation.next();
        self.key = None;
        self.activated = false;
        self.state = FetchState::Idle;
    }
}
