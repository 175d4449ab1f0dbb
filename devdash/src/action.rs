//! Dashboard actions
//!
//! Naming follows the category prefix convention: `Github*` and `Weather*`
//! for the cards, `Input*` for the prompt, `Theme*` and `Ui*` for display.
//! A `Did` in the name marks the result of async work; those carry the
//! [`Generation`] of the cycle that produced them.

use chrono::{DateTime, Local};
use devdash_core::Generation;

use crate::api::{GitHubProfile, WeatherReport};
use crate::location::Coordinates;
use crate::state::InputTarget;
use crate::theme::Theme;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== GitHub card =====
    /// Set the username trigger; blank clears it
    GithubUsernameSet(String),
    GithubDidLoad {
        generation: Generation,
        profile: GitHubProfile,
    },
    GithubDidError {
        generation: Generation,
        message: String,
    },

    // ===== Weather card =====
    /// Set the city trigger; blank clears it
    WeatherCitySet(String),
    /// Switch the weather card to the device location
    WeatherLocate,
    /// Device location for the `WeatherLocate` request numbered `request`
    WeatherDidLocate {
        request: u64,
        coords: Coordinates,
    },
    WeatherDidLoad {
        generation: Generation,
        report: WeatherReport,
    },
    WeatherDidError {
        generation: Generation,
        message: String,
    },

    /// Reload both cards with their current triggers
    Refresh,

    // ===== Prompt =====
    InputOpen(InputTarget),
    InputChange(String),
    InputSubmit(String),
    InputCancel,

    // ===== Display =====
    ThemeToggle,
    ThemeDidChange(Theme),
    UiToggleUnits,
    UiTerminalResize(u16, u16),

    // ===== Global =====
    ClockTick(DateTime<Local>),
    /// Loading animation frame
    Tick,
    Quit,
}

impl devdash_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::GithubUsernameSet(_) => "GithubUsernameSet",
            Action::GithubDidLoad { .. } => "GithubDidLoad",
            Action::GithubDidError { .. } => "GithubDidError",
            Action::WeatherCitySet(_) => "WeatherCitySet",
            Action::WeatherLocate => "WeatherLocate",
            Action::WeatherDidLocate { .. } => "WeatherDidLocate",
            Action::WeatherDidLoad { .. } => "WeatherDidLoad",
            Action::WeatherDidError { .. } => "WeatherDidError",
            Action::Refresh => "Refresh",
            Action::InputOpen(_) => "InputOpen",
            Action::InputChange(_) => "InputChange",
            Action::InputSubmit(_) => "InputSubmit",
            Action::InputCancel => "InputCancel",
            Action::ThemeToggle => "ThemeToggle",
            Action::ThemeDidChange(_) => "ThemeDidChange",
            Action::UiToggleUnits => "UiToggleUnits",
            Action::UiTerminalResize(..) => "UiTerminalResize",
            Action::ClockTick(_) => "ClockTick",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }
}
