use serde::{Deserialize, Serialize};

/// A fixed place the display reports on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

pub const SAN_FRANCISCO: Location = Location {
    name: "San Francisco",
    latitude: 37.7749,
    longitude: -122.4194,
};

/// Snapshot taken from Open-Meteo's `current_weather` object.
///
/// Values are passed through as the API reports them: temperature in °C,
/// wind speed in km/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature: f64,
    pub windspeed: f64,
}

/// Response body of `/v1/forecast?current_weather=true`.
/// Only the fields we read are declared; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    pub current_weather: WeatherReading,
}

/// Whether data has arrived yet. Starts as `Loading` and moves to `Loaded`
/// at most once.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DisplayState {
    #[default]
    Loading,
    Loaded(WeatherReading),
}

impl DisplayState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        match self {
            DisplayState::Loading => None,
            DisplayState::Loaded(reading) => Some(reading),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_ignores_extra_fields() {
        let body = r#"{
            "latitude": 37.763283,
            "longitude": -122.41286,
            "current_weather": {
                "time": "2024-05-24T17:00",
                "temperature": 18.5,
                "windspeed": 12.3,
                "winddirection": 270,
                "weathercode": 3,
                "is_day": 1
            }
        }"#;

        let parsed: CurrentWeatherResponse = serde_json::from_str(body).expect("valid body");
        assert_eq!(
            parsed.current_weather,
            WeatherReading { temperature: 18.5, windspeed: 12.3 }
        );
    }

    #[test]
    fn response_without_current_weather_is_rejected() {
        let err = serde_json::from_str::<CurrentWeatherResponse>(r#"{"latitude": 1.0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("current_weather"));
    }

    #[test]
    fn reading_requires_numeric_fields() {
        let body = r#"{"current_weather": {"temperature": "warm", "windspeed": 3}}"#;
        assert!(serde_json::from_str::<CurrentWeatherResponse>(body).is_err());
    }

    #[test]
    fn display_state_starts_loading() {
        let state = DisplayState::default();
        assert!(state.is_loading());
        assert!(state.reading().is_none());
    }
}
