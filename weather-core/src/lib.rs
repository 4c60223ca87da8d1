//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The current-weather reading and the display state
//! - The Open-Meteo provider behind the `WeatherProvider` trait
//! - `WeatherDisplay`, which fetches once on mount and renders a view tree
//! - Configuration handling
//!
//! It is used by `weather-cli`, but any host running a Tokio runtime can mount
//! the display.

pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod provider;
pub mod view;

pub use config::Config;
pub use display::WeatherDisplay;
pub use error::FetchError;
pub use model::{DisplayState, Location, SAN_FRANCISCO, WeatherReading};
pub use provider::{WeatherProvider, open_meteo::OpenMeteoProvider, provider_from_config};
pub use view::Element;
