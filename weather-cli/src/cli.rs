use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand, builder::NonEmptyStringValueParser};
use inquire::{CustomType, Text};
use weather_core::{
    Config, Geolocation, HttpWeatherApi, Locator, LocatorOutcome, UiState, WeatherApi,
    WeatherView,
};

use crate::{geolocation::FixedPosition, terminal::Terminal};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather by city or location")]
pub struct Cli {
    /// Base URL of the weather backend; overrides the config file.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the backend URL and request timeout.
    Configure,

    /// Show weather for a city.
    Show {
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        city: String,
    },

    /// Open a results page URL, e.g. "weather.html?city=Oslo".
    Open { url: String },

    /// Look up weather for a position and follow the redirect to the results page.
    Locate {
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => {
                configure(config)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city } => {
                let api = build_api(&config, self.api_url.as_deref())?;
                let mut view = WeatherView::new(api);
                let state = view.fetch_by_city(&city, &mut Terminal::stdout()).await;
                Ok(exit_code(state))
            }
            Command::Open { url } => {
                let api = build_api(&config, self.api_url.as_deref())?;
                Ok(open_results_page(api, &url).await)
            }
            Command::Locate { lat, lon } => {
                let api = build_api(&config, self.api_url.as_deref())?;
                let geolocation = lat.zip(lon).map(|(lat, lon)| {
                    Arc::new(FixedPosition { lat, lon }) as Arc<dyn Geolocation>
                });

                let mut locator = Locator::new(geolocation, api.clone());
                match locator.request_location(&mut Terminal::stdout()).await {
                    LocatorOutcome::Redirect(url) => {
                        println!("Redirecting to {url}");
                        Ok(open_results_page(api, &url).await)
                    }
                    LocatorOutcome::Failed(_) | LocatorOutcome::Busy => Ok(ExitCode::FAILURE),
                }
            }
        }
    }
}

fn build_api(config: &Config, override_url: Option<&str>) -> anyhow::Result<Arc<dyn WeatherApi>> {
    let base_url = config.resolve_base_url(override_url);
    let api = HttpWeatherApi::new(base_url, config.request_timeout())
        .with_context(|| format!("Cannot use weather backend at '{base_url}'"))?;
    Ok(Arc::new(api))
}

async fn open_results_page(api: Arc<dyn WeatherApi>, url: &str) -> ExitCode {
    let mut view = WeatherView::new(api);
    let state = view.load(url, &mut Terminal::stdout()).await;
    exit_code(state)
}

fn exit_code(state: &UiState) -> ExitCode {
    match state {
        UiState::Result(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let current = config.resolve_base_url(None).to_string();

    let base_url = Text::new("Weather backend URL:")
        .with_default(&current)
        .with_validator(|input: &str| {
            Ok(match HttpWeatherApi::new(input, None) {
                Ok(_) => inquire::validator::Validation::Valid,
                Err(e) => inquire::validator::Validation::Invalid(e.to_string().into()),
            })
        })
        .prompt()
        .context("Failed to read backend URL")?;

    let timeout = CustomType::<u64>::new("Request timeout in seconds (0 for none):")
        .with_default(config.request_timeout_secs.unwrap_or(0))
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read request timeout")?;

    config.api_base_url = Some(base_url);
    config.request_timeout_secs = (timeout > 0).then_some(timeout);

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
