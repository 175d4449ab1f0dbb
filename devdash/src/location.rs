//! Device location for the weather card
//!
//! The terminal has no permission prompt, so "device location" is whatever
//! the user configured: `--lat/--lon`, or `DEVDASH_LOCATION="lat,lon"`.
//! When neither is usable the card falls back to [`DEFAULT_COORDINATES`];
//! an unavailable location is never an error.

use std::fmt;

use thiserror::Error;

/// Environment variable holding `"latitude,longitude"`.
pub const LOCATION_ENV: &str = "DEVDASH_LOCATION";

/// Kigali
pub const DEFAULT_COORDINATES: Coordinates = Coordinates {
    latitude: -1.9441,
    longitude: 30.0619,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude < 0.0 { 'S' } else { 'N' };
        let ew = if self.longitude < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.2}°{}, {:.2}°{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("no device location configured")]
    Unavailable,
    #[error("invalid location {0:?}")]
    Invalid(String),
}

/// Parse `"lat,lon"`.
pub fn parse_coordinates(raw: &str) -> Result<Coordinates, LocationError> {
    let invalid = || LocationError::Invalid(raw.to_string());
    let (lat, lon) = raw.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

    let coords = Coordinates::new(lat, lon);
    if coords.is_valid() {
        Ok(coords)
    } else {
        Err(invalid())
    }
}

/// Source of the device location.
#[derive(Debug, Clone, Default)]
pub struct Geolocator {
    configured: Option<Coordinates>,
    env_value: Option<String>,
}

impl Geolocator {
    /// Use explicit coordinates first, then the environment.
    pub fn new(configured: Option<Coordinates>) -> Self {
        Self {
            configured,
            env_value: std::env::var(LOCATION_ENV).ok(),
        }
    }

    /// Build without reading the process environment.
    pub fn with_env_value(configured: Option<Coordinates>, env_value: Option<String>) -> Self {
        Self {
            configured,
            env_value,
        }
    }

    pub fn locate(&self) -> Result<Coordinates, LocationError> {
        if let Some(coords) = self.configured {
            return if coords.is_valid() {
                Ok(coords)
            } else {
                Err(LocationError::Invalid(coords.to_string()))
            };
        }
        match self.env_value.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_coordinates(raw),
            _ => Err(LocationError::Unavailable),
        }
    }
}

/// Device location, or the default coordinates when it is unavailable.
pub fn locate_or_default(geolocator: &Geolocator) -> Coordinates {
    match geolocator.locate() {
        Ok(coords) => coords,
        Err(reason) => {
            tracing::info!(%reason, fallback = %DEFAULT_COORDINATES, "Device location unavailable");
            DEFAULT_COORDINATES
        }
    }
}
