use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::FetchError, model::WeatherResult};

pub mod http;

pub use http::HttpWeatherApi;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// The backend weather endpoints.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    /// `GET /api/weather/{city}`
    async fn weather_by_city(&self, city: &str) -> Result<WeatherResult, FetchError>;

    /// `GET /api/weather/coordinates?lat={lat}&lon={lon}`
    ///
    /// Coordinates are sent as given so the backend sees exactly what the page URL held.
    async fn weather_by_coordinates(&self, lat: &str, lon: &str)
    -> Result<WeatherResult, FetchError>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
