//! Core library for the weather lookup client.
//!
//! This crate defines:
//! - The backend API client (`/api/weather/...`)
//! - The home page controller ([`Locator`]) and results page controller ([`WeatherView`])
//! - The view states they render and the page element ids they map onto
//! - Configuration handling
//!
//! It is used by `weather-cli`, but any front end that implements [`Render`] can drive it.

pub mod api;
pub mod config;
pub mod error;
pub mod locator;
pub mod model;
pub mod query;
pub mod render;
pub mod view;

pub use api::{HttpWeatherApi, WeatherApi};
pub use config::Config;
pub use error::{FetchError, LocationError, QueryError};
pub use locator::{Geolocation, Locator, LocatorOutcome, LocatorView, PositionOptions, Status};
pub use model::{Fix, QueryKind, Reading, WeatherQuery, WeatherResult};
pub use query::{HOME_PAGE, RESULTS_PAGE, parse_query, results_url};
pub use render::{NoRender, Render};
pub use view::{UiState, ViewModel, WeatherView};
