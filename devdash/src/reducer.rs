//! Reducer: `(state, action) -> DispatchResult<Effect>`
//!
//! All state mutations happen here. Network work is only ever requested
//! through effects carrying a [`Cycle`](devdash_core::Cycle); completions come back
//! as `*DidLoad`/`*DidError` actions and go through [`Fetch::resolve`],
//! which drops anything from a superseded cycle.

use devdash_core::{DispatchResult, Fetch, Generation, TriggerKey};

use crate::action::Action;
use crate::api::WeatherQuery;
use crate::effect::{Effect, GITHUB_TASK, LOCATE_TASK, WEATHER_TASK};
use crate::state::{AppState, InputState, InputTarget};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== GitHub card =====
        Action::GithubUsernameSet(username) => set_username(state, username),

        Action::GithubDidLoad {
            generation,
            profile,
        } => applied(state.github.succeed(generation, profile).is_applied()),

        Action::GithubDidError {
            generation,
            message,
        } => applied(state.github.fail(generation, message).is_applied()),

        // ===== Weather card =====
        Action::WeatherCitySet(city) => set_city(state, city),

        Action::WeatherLocate => {
            state.locate_requests += 1;
            state.locating = Some(state.locate_requests);
            DispatchResult::effect(Effect::Locate(state.locate_requests))
        }

        Action::WeatherDidLocate { request, coords } => {
            if state.locating != Some(request) {
                tracing::debug!(request, "Dropping superseded location result");
                return DispatchResult::unchanged();
            }
            state.locating = None;
            retrigger(
                &mut state.weather,
                Some(WeatherQuery::Coordinates(coords)),
                Effect::FetchWeather,
                WEATHER_TASK,
            )
        }

        Action::WeatherDidLoad { generation, report } => {
            applied(state.weather.succeed(generation, report).is_applied())
        }

        Action::WeatherDidError {
            generation,
            message,
        } => applied(state.weather.fail(generation, message).is_applied()),

        Action::Refresh => {
            let github = state.github.reload().map(Effect::FetchProfile);
            let weather = state.weather.reload().map(Effect::FetchWeather);
            let result = DispatchResult::unchanged().with_opt(github).with_opt(weather);
            if result.has_effects() {
                result.mark_changed()
            } else {
                result
            }
        }

        // ===== Prompt =====
        Action::InputOpen(target) => {
            state.input = Some(InputState {
                target,
                value: state.trigger_text(target),
            });
            DispatchResult::changed()
        }

        Action::InputChange(value) => match state.input.as_mut() {
            Some(input) if input.value != value => {
                input.value = value;
                DispatchResult::changed()
            }
            _ => DispatchResult::unchanged(),
        },

        Action::InputSubmit(value) => match state.input.take() {
            Some(InputState {
                target: InputTarget::Username,
                ..
            }) => set_username(state, value).mark_changed(),
            Some(InputState {
                target: InputTarget::City,
                ..
            }) => set_city(state, value).mark_changed(),
            None => DispatchResult::unchanged(),
        },

        Action::InputCancel => applied(state.input.take().is_some()),

        // ===== Display =====
        Action::ThemeToggle => DispatchResult::effect(Effect::ToggleTheme),

        Action::ThemeDidChange(theme) => {
            if state.theme == theme {
                return DispatchResult::unchanged();
            }
            state.theme = theme;
            DispatchResult::changed()
        }

        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::ClockTick(now) => {
            state.now = now;
            DispatchResult::changed()
        }

        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // Only the spinner animates
            applied(state.is_loading())
        }

        Action::Quit => {
            state.github.dispose();
            state.weather.dispose();
            state.input = None;
            state.locating = None;
            DispatchResult::changed_with_many(vec![
                Effect::CancelFetch(GITHUB_TASK),
                Effect::CancelFetch(WEATHER_TASK),
                Effect::CancelFetch(LOCATE_TASK),
            ])
        }
    }
}

fn applied(changed: bool) -> DispatchResult<Effect> {
    if changed {
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}

fn set_username(state: &mut AppState, username: String) -> DispatchResult<Effect> {
    retrigger(
        &mut state.github,
        Some(username.trim().to_string()),
        Effect::FetchProfile,
        GITHUB_TASK,
    )
}

/// A typed city wins over any location lookup still pending.
fn set_city(state: &mut AppState, city: String) -> DispatchResult<Effect> {
    let cancel_locate = state
        .locating
        .take()
        .map(|_| Effect::CancelFetch(LOCATE_TASK));
    retrigger(
        &mut state.weather,
        Some(WeatherQuery::City(city.trim().to_string())),
        Effect::FetchWeather,
        WEATHER_TASK,
    )
    .with_opt(cancel_locate)
}

/// Feed a new trigger key into a card's fetch.
///
/// A started cycle becomes a fetch effect. A cleared key cancels the task
/// that may still be running for the old cycle.
fn retrigger<K: TriggerKey, T>(
    fetch: &mut Fetch<K, T>,
    key: Option<K>,
    fetch_effect: fn(devdash_core::Cycle<K>) -> Effect,
    task: &'static str,
) -> DispatchResult<Effect> {
    let before: Generation = fetch.generation();
    match fetch.set_key(key) {
        Some(cycle) => {
            tracing::info!(task, generation = cycle.generation.value(), key = ?cycle.key, "Starting fetch cycle");
            DispatchResult::changed_with(fetch_effect(cycle))
        }
        None if fetch.generation() != before => {
            DispatchResult::changed_with(Effect::CancelFetch(task))
        }
        None => DispatchResult::unchanged(),
    }
}
