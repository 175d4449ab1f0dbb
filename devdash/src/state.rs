//! Application state
//!
//! Components receive `&AppState` as props; only the reducer mutates it.
//! Each card owns its own [`Fetch`], so the two cards never share state.

use chrono::{DateTime, Local};
use devdash_core::Fetch;

use crate::api::{GitHubProfile, WeatherQuery, WeatherReport};
use crate::theme::Theme;

/// Loading spinner frame interval
pub const LOADING_ANIM_TICK_MS: u64 = 100;

/// Temperature unit preference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn toggle(self) -> Self {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }

    pub fn format(self, celsius: f64) -> String {
        match self {
            TempUnit::Celsius => format!("{:.1}°C", celsius),
            TempUnit::Fahrenheit => format!("{:.1}°F", celsius * 9.0 / 5.0 + 32.0),
        }
    }
}

/// Which trigger the prompt edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputTarget {
    Username,
    City,
}

impl InputTarget {
    pub fn label(self) -> &'static str {
        match self {
            InputTarget::Username => "GitHub username",
            InputTarget::City => "City",
        }
    }
}

/// An open prompt and its current text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputState {
    pub target: InputTarget,
    pub value: String,
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub github: Fetch<String, GitHubProfile>,
    pub weather: Fetch<WeatherQuery, WeatherReport>,

    /// Prompt being edited, if any
    pub input: Option<InputState>,

    /// Device location request still waiting for its answer. A typed city
    /// clears it, so a late location never replaces the city.
    pub locating: Option<u64>,
    /// Number of location requests made so far
    pub locate_requests: u64,

    pub theme: Theme,
    pub unit: TempUnit,

    /// Wall clock shown in the navbar
    pub now: DateTime<Local>,

    /// Animation frame counter (loading spinner)
    pub tick_count: u32,
    pub terminal_size: (u16, u16),
}

impl AppState {
    pub fn new(theme: Theme) -> Self {
        Self {
            github: Fetch::new(),
            weather: Fetch::new(),
            input: None,
            locating: None,
            locate_requests: 0,
            theme,
            unit: TempUnit::default(),
            now: Local::now(),
            tick_count: 0,
            terminal_size: (80, 24),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.github.state().is_loading() || self.weather.state().is_loading()
    }

    /// Current text of a trigger, used to prefill the prompt.
    pub fn trigger_text(&self, target: InputTarget) -> String {
        match target {
            InputTarget::Username => self.github.key().cloned().unwrap_or_default(),
            InputTarget::City => match self.weather.key() {
                Some(WeatherQuery::City(city)) => city.clone(),
                _ => String::new(),
            },
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_unit_format() {
        assert_eq!(TempUnit::Celsius.format(21.44), "21.4°C");
        assert_eq!(TempUnit::Fahrenheit.format(0.0), "32.0°F");
        assert_eq!(TempUnit::Celsius.toggle(), TempUnit::Fahrenheit);
    }

    #[test]
    fn test_trigger_text_prefills_prompt() {
        let mut state = AppState::default();
        assert_eq!(state.trigger_text(InputTarget::Username), "");

        state.github.set_key(Some("octocat".into()));
        state.weather.set_key(Some(WeatherQuery::City("Kigali".into())));
        assert_eq!(state.trigger_text(InputTarget::Username), "octocat");
        assert_eq!(state.trigger_text(InputTarget::City), "Kigali");
    }
}
