//! HTTP clients for the dashboard cards
//!
//! - `github`: user profile lookup
//! - `weather`: Open-Meteo geocoding + current weather
//!
//! Every call returns [`FetchError`]; only [`FetchError::user_message`]
//! is ever shown on screen.

pub mod github;
pub mod weather;

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use github::GitHubProfile;
pub use weather::{condition_label, CurrentWeather, ResolvedLocation, WeatherQuery, WeatherReport};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("devdash/", env!("CARGO_PKG_VERSION"));

/// Base URLs for the upstream services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub github: String,
    pub geocoding: String,
    pub forecast: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            github: "https://api.github.com".into(),
            geocoding: "https://geocoding-api.open-meteo.com".into(),
            forecast: "https://api.open-meteo.com".into(),
        }
    }
}

impl Endpoints {
    /// Route every service to one base URL (mock servers).
    pub fn all(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            github: base.clone(),
            geocoding: base.clone(),
            forecast: base,
        }
    }
}

/// Failure of one fetch step.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, DNS, TLS or timeout failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status
    #[error("{service} responded {status}")]
    HttpStatus { service: &'static str, status: u16 },

    /// The lookup succeeded but matched nothing
    #[error("{0}")]
    NotFound(String),

    /// The body is missing an expected field or is not valid JSON
    #[error("{0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Short message for the error display. Transport details stay in logs.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Transport(e) if e.is_timeout() => {
                "Request timed out. Check your network.".to_string()
            }
            FetchError::Transport(_) => "Network request failed. Check your connection.".to_string(),
            FetchError::HttpStatus { service, status } => format!("{service} responded {status}"),
            FetchError::NotFound(message) | FetchError::MalformedResponse(message) => {
                message.clone()
            }
        }
    }
}

/// Shared HTTP client for all cards. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Send `request` and decode a JSON body, mapping non-2xx to `HttpStatus`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, FetchError> {
        let response = request.send().await?;
        let response = check_status(service, response)?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(service, error = %e, "Could not decode response body");
            FetchError::MalformedResponse(format!("Unexpected response from {service}"))
        })
    }
}

fn check_status(service: &'static str, response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::info!(service, status = status.as_u16(), "Upstream returned an error status");
        Err(FetchError::HttpStatus {
            service,
            status: status.as_u16(),
        })
    }
}
