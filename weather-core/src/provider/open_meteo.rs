use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::{FetchError, truncate_body},
    model::{CurrentWeatherResponse, Location, WeatherReading},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";
const FORECAST_PATH: &str = "/v1/forecast";

/// Open-Meteo forecast API, queried for the `current_weather` block only.
/// No API key, no timeout, no retries.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the provider at another host serving the same API (a mirror or a
    /// local mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn forecast_url(&self) -> String {
        format!("{}{}", self.base_url, FORECAST_PATH)
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Query string for a location: always latitude, longitude and
/// `current_weather=true`, in that order.
pub fn query_params(location: &Location) -> [(&'static str, String); 3] {
    [
        ("latitude", location.latitude.to_string()),
        ("longitude", location.longitude.to_string()),
        ("current_weather", "true".to_string()),
    ]
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn current_weather(&self, location: &Location) -> Result<WeatherReading, FetchError> {
        let url = self.forecast_url();

        tracing::info!("Fetching current weather for {}", location.name);

        let res = self
            .http
            .get(&url)
            .query(&query_params(location))
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::Body)?;

        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: CurrentWeatherResponse = serde_json::from_str(&body)?;

        tracing::debug!(
            "Open-Meteo reported {}°C, {} km/h",
            parsed.current_weather.temperature,
            parsed.current_weather.windspeed
        );

        Ok(parsed.current_weather)
    }
}
