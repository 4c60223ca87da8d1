use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config, FetchError,
    model::{Location, WeatherReading},
    provider::open_meteo::OpenMeteoProvider,
};

pub mod open_meteo;

/// Source of current-weather readings.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, location: &Location) -> Result<WeatherReading, FetchError>;
}

/// Construct the Open-Meteo provider, honoring a base URL override from config.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let provider = match config.api_base_url.as_deref() {
        Some(base_url) => OpenMeteoProvider::with_base_url(base_url),
        None => OpenMeteoProvider::new(),
    };
    tracing::debug!("Using Open-Meteo at {}", provider.base_url());
    Box::new(provider)
}
