//! devdash: a terminal developer dashboard
//!
//! Two cards, each driven by its own fetch lifecycle:
//! - GitHub profile for a username
//! - current weather for a city (or the device location)
//!
//! plus a persisted light/dark theme and a ticking clock.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod location;
pub mod reducer;
pub mod state;
pub mod theme;
