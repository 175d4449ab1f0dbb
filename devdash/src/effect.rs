//! Side effects declared by the reducer, and the handler that runs them
//!
//! The reducer never touches the network. It returns an [`Effect`], and
//! [`handle_effect`] turns it into a task spawned under the card's key, so
//! a newer cycle for the same card aborts the older request.

use devdash_core::{Cycle, EffectContext, TaskKey};

use crate::action::Action;
use crate::api::{ApiClient, WeatherQuery};
use crate::location::{locate_or_default, Geolocator};
use crate::theme::ThemeContext;

/// Task key of the GitHub card
pub const GITHUB_TASK: &str = "github";
/// Task key of the weather card
pub const WEATHER_TASK: &str = "weather";
/// Task key of the device location lookup
pub const LOCATE_TASK: &str = "locate";

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Look up a GitHub profile for this cycle
    FetchProfile(Cycle<String>),
    /// Geocode (for cities) then fetch current weather for this cycle
    FetchWeather(Cycle<WeatherQuery>),
    /// Abort whatever is in flight under a task key
    CancelFetch(&'static str),
    /// Resolve the device location for this request number, falling back
    /// to the default coordinates
    Locate(u64),
    /// Flip and persist the theme
    ToggleTheme,
}

/// Everything effects need besides the runtime context.
pub struct Services {
    pub api: ApiClient,
    pub theme: ThemeContext,
    pub geolocator: Geolocator,
}

/// Run one effect.
pub fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, services: &mut Services) {
    match effect {
        Effect::FetchProfile(cycle) => {
            let api = services.api.clone();
            ctx.tasks().spawn(GITHUB_TASK, async move {
                match api.fetch_profile(&cycle.key).await {
                    Ok(profile) => Action::GithubDidLoad {
                        generation: cycle.generation,
                        profile,
                    },
                    Err(e) => {
                        tracing::warn!(username = %cycle.key, error = %e, "GitHub lookup failed");
                        Action::GithubDidError {
                            generation: cycle.generation,
                            message: e.user_message(),
                        }
                    }
                }
            });
        }
        Effect::FetchWeather(cycle) => {
            let api = services.api.clone();
            ctx.tasks().spawn(WEATHER_TASK, async move {
                match api.fetch_weather(&cycle.key).await {
                    Ok(report) => Action::WeatherDidLoad {
                        generation: cycle.generation,
                        report,
                    },
                    Err(e) => {
                        tracing::warn!(query = ?cycle.key, error = %e, "Weather lookup failed");
                        Action::WeatherDidError {
                            generation: cycle.generation,
                            message: e.user_message(),
                        }
                    }
                }
            });
        }
        Effect::CancelFetch(key) => {
            ctx.tasks().cancel(&TaskKey::new(key));
        }
        Effect::Locate(request) => {
            let geolocator = services.geolocator.clone();
            ctx.tasks().spawn(LOCATE_TASK, async move {
                Action::WeatherDidLocate {
                    request,
                    coords: locate_or_default(&geolocator),
                }
            });
        }
        Effect::ToggleTheme => {
            if let Err(e) = services.theme.toggle() {
                tracing::warn!(error = %e, "Could not persist theme");
            }
            ctx.emit(Action::ThemeDidChange(services.theme.theme()));
        }
    }
}
