use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use weather_core::{Config, WeatherDisplay, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather in San Francisco")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the Open-Meteo base URL (e.g. a mirror).
    Configure {
        /// Base URL; prompts when omitted.
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Fetch and show the current weather.
    Show {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Print where the config file lives.
    ConfigPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Html,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { base_url } => configure(base_url),
            Command::Show { format } => show(format).await,
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn configure(base_url: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let url = match base_url {
        Some(url) => url,
        None => inquire::Text::new("Open-Meteo base URL:")
            .with_default(config.base_url())
            .prompt()
            .context("Failed to read base URL")?,
    };

    config.set_api_base_url(&url);
    config.save()?;

    println!("Using {}", config.base_url());
    Ok(())
}

async fn show(format: Format) -> anyhow::Result<()> {
    let config = Config::load()?;
    println!("{}", render_view(&config, format).await?);
    Ok(())
}

/// Mount the display, wait for its fetch to settle and render what it shows.
async fn render_view(config: &Config, format: Format) -> anyhow::Result<String> {
    let provider = Arc::from(provider_from_config(config));

    let mut weather = WeatherDisplay::mount(provider);
    weather.settled().await;

    let state = weather.state();
    tracing::debug!("Display settled in state {:?}", state);

    let output = match format {
        Format::Text => weather.render().to_string(),
        Format::Html => weather.render_html().context("Failed to render HTML view")?,
    };

    weather.unmount();
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_open_meteo(response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "37.7749"))
            .and(query_param("longitude", "-122.4194"))
            .and(query_param("current_weather", "true"))
            .respond_with(response)
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn config_for(server: &MockServer) -> Config {
        Config {
            api_base_url: Some(server.uri()),
        }
    }

    fn loaded_body() -> serde_json::Value {
        serde_json::json!({
            "current_weather": { "temperature": 18.5, "windspeed": 12.3, "weathercode": 1 }
        })
    }

    #[tokio::test]
    async fn show_text_prints_reading() {
        let server = mock_open_meteo(ResponseTemplate::new(200).set_body_json(loaded_body())).await;

        let output = render_view(&config_for(&server), Format::Text)
            .await
            .expect("show succeeds");

        assert_eq!(
            output,
            "Weather in San Francisco\nTemperature: 18.5°C\nWind Speed: 12.3 km/h"
        );
    }

    #[tokio::test]
    async fn show_html_prints_markup() {
        let server = mock_open_meteo(ResponseTemplate::new(200).set_body_json(loaded_body())).await;

        let output = render_view(&config_for(&server), Format::Html)
            .await
            .expect("show succeeds");

        assert!(output.starts_with("<div><h1>Weather in San Francisco</h1>"));
        assert!(output.contains("<p>Wind Speed: 12.3 km/h</p>"));
    }

    #[tokio::test]
    async fn show_prints_placeholder_when_fetch_fails() {
        let server = mock_open_meteo(ResponseTemplate::new(500).set_body_string("boom")).await;

        let output = render_view(&config_for(&server), Format::Text)
            .await
            .expect("failure is not an error for show");

        assert_eq!(output, "Loading...");
    }

    #[test]
    fn parses_show_with_default_format() {
        let cli = Cli::try_parse_from(["weather", "show"]).expect("valid args");
        assert!(matches!(cli.command, Command::Show { format: Format::Text }));
    }

    #[test]
    fn parses_show_html() {
        let cli = Cli::try_parse_from(["weather", "show", "--format", "html"]).expect("valid args");
        assert!(matches!(cli.command, Command::Show { format: Format::Html }));
    }

    #[test]
    fn parses_configure_with_url() {
        let cli = Cli::try_parse_from(["weather", "configure", "--base-url", "http://localhost:1"])
            .expect("valid args");
        match cli.command {
            Command::Configure { base_url } => {
                assert_eq!(base_url.as_deref(), Some("http://localhost:1"))
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["weather", "show", "--format", "pdf"]).is_err());
    }
}
