//! Light/dark theme with a persisted preference
//!
//! [`ThemeContext`] is created once at startup. It owns the current theme
//! and the [`ThemeStore`], and every change goes through
//! [`ThemeContext::set`], which also writes the settings file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light Mode",
            Theme::Dark => "Dark Mode",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                bg: Color::Rgb(250, 250, 250),
                fg: Color::Rgb(17, 24, 39),
                muted: Color::Rgb(107, 114, 128),
                border: Color::Rgb(209, 213, 219),
                accent: Color::Rgb(37, 99, 235),
                error: Color::Rgb(185, 28, 28),
            },
            Theme::Dark => Palette {
                bg: Color::Rgb(17, 24, 39),
                fg: Color::Rgb(243, 244, 246),
                muted: Color::Rgb(156, 163, 175),
                border: Color::Rgb(55, 65, 81),
                accent: Color::Rgb(96, 165, 250),
                error: Color::Rgb(252, 165, 165),
            },
        }
    }
}

/// Colors used by every component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub error: Color,
}

/// On-disk settings document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<Theme>,
}

/// Reads and writes the `"theme"` entry of the settings file.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/devdash/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("devdash").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persisted theme. Missing or unreadable files yield `None`.
    pub fn load(&self) -> Option<Theme> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<Settings>(&raw) {
            Ok(settings) => settings.theme,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring invalid settings file");
                None
            }
        }
    }

    pub fn save(&self, theme: Theme) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let settings = Settings { theme: Some(theme) };
        let json = serde_json::to_string_pretty(&settings)?;
        fs::write(&self.path, json)
    }
}

/// Theme implied by the terminal's background color.
///
/// Reads `COLORFGBG` ("fg;bg"); background indices 0-6 and 8 are dark.
pub fn system_preference() -> Option<Theme> {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| theme_from_colorfgbg(&value))
}

fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(match bg {
        0..=6 | 8 => Theme::Dark,
        _ => Theme::Light,
    })
}

/// Process-wide theme state.
#[derive(Debug)]
pub struct ThemeContext {
    store: Option<ThemeStore>,
    theme: Theme,
}

impl ThemeContext {
    /// Persisted value, else the system preference, else light.
    pub fn load(store: Option<ThemeStore>, system: Option<Theme>) -> Self {
        let theme = store
            .as_ref()
            .and_then(ThemeStore::load)
            .or(system)
            .unwrap_or_default();
        tracing::debug!(?theme, "Initial theme");
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Change the theme and persist it. The in-memory theme changes even if
    /// writing fails.
    pub fn set(&mut self, theme: Theme) -> io::Result<()> {
        self.theme = theme;
        match &self.store {
            Some(store) => store.save(theme),
            None => Ok(()),
        }
    }

    pub fn toggle(&mut self) -> io::Result<Theme> {
        let next = self.theme.toggle();
        self.set(next)?;
        Ok(next)
    }
}
