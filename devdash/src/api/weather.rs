//! Open-Meteo geocoding and current weather
//!
//! A city query runs two requests in order: geocode the name, then fetch
//! current weather at the resolved coordinates. The forecast request is
//! only issued after geocoding succeeded. Coordinate queries skip the
//! geocoding step.

use serde::Deserialize;

use devdash_core::TriggerKey;

use super::{ApiClient, FetchError};
use crate::location::Coordinates;

/// Trigger key of the weather card.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    /// Typed city name, resolved through geocoding
    City(String),
    /// Device location, used as-is
    Coordinates(Coordinates),
}

impl TriggerKey for WeatherQuery {
    fn is_blank(&self) -> bool {
        match self {
            WeatherQuery::City(city) => city.trim().is_empty(),
            WeatherQuery::Coordinates(_) => false,
        }
    }
}

/// A place produced by geocoding, valid for one fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl ResolvedLocation {
    /// "Name, Country" when the country is known.
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }
}

/// `current_weather` block of the forecast response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentWeather {
    /// Degrees Celsius
    pub temperature: f64,
    /// km/h
    #[serde(rename = "windspeed")]
    pub wind_speed: f64,
    /// Degrees
    #[serde(rename = "winddirection", default)]
    pub wind_direction: Option<f64>,
    /// WMO weather interpretation code
    #[serde(rename = "weathercode")]
    pub weather_code: i32,
    /// Observation time as reported upstream (ISO 8601, GMT)
    pub time: String,
}

impl CurrentWeather {
    pub fn condition(&self) -> &'static str {
        condition_label(self.weather_code)
    }
}

/// Result of one complete weather cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub location: ResolvedLocation,
    pub current: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

impl ApiClient {
    /// Resolve a city name to its first geocoding match.
    pub async fn geocode(&self, city: &str) -> Result<ResolvedLocation, FetchError> {
        let url = format!(
            "{}/v1/search?count=1&name={}",
            self.endpoints().geocoding.trim_end_matches('/'),
            urlencoding::encode(city.trim())
        );
        tracing::info!(%city, "Geocoding city");

        let response: GeocodingResponse = self.get_json("Geocoding", self.http.get(&url)).await?;
        response
            .results
            .and_then(|results| results.into_iter().next())
            .map(|place| ResolvedLocation {
                name: place.name,
                country: place.country,
                latitude: place.latitude,
                longitude: place.longitude,
            })
            .ok_or_else(|| FetchError::NotFound("City not found".into()))
    }

    /// Current weather at the given coordinates.
    pub async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeather, FetchError> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current_weather=true",
            self.endpoints().forecast.trim_end_matches('/'),
            latitude,
            longitude
        );
        tracing::info!(latitude, longitude, "Fetching current weather");

        let response: ForecastResponse = self.get_json("Weather", self.http.get(&url)).await?;
        response
            .current_weather
            .ok_or_else(|| FetchError::MalformedResponse("No current weather returned".into()))
    }

    /// One weather cycle: geocode (for city queries), then forecast.
    pub async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherReport, FetchError> {
        let location = match query {
            WeatherQuery::City(city) => self.geocode(city).await?,
            WeatherQuery::Coordinates(coords) => ResolvedLocation {
                name: "Current location".into(),
                country: None,
                latitude: coords.latitude,
                longitude: coords.longitude,
            },
        };
        let current = self
            .current_weather(location.latitude, location.longitude)
            .await?;

        Ok(WeatherReport { location, current })
    }
}

/// Label for a WMO weather code; unmapped codes are "Unknown".
pub fn condition_label(code: i32) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Drizzle: light",
        53 => "Drizzle: moderate",
        55 => "Drizzle: dense",
        61 => "Rain: slight",
        63 => "Rain: moderate",
        65 => "Rain: heavy",
        71 => "Snow: slight",
        73 => "Snow: moderate",
        75 => "Snow: heavy",
        80 => "Rain showers: slight",
        81 => "Rain showers: moderate",
        82 => "Rain showers: violent",
        95 => "Thunderstorm",
        96 => "Thunderstorm w/ hail",
        99 => "Thunderstorm w/ heavy hail",
        _ => "Unknown",
    }
}
