//! Home page controller: turns a geolocation fix into a results page redirect.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{fmt::Debug, sync::Arc, time::Duration};

use crate::{
    api::WeatherApi,
    error::{FetchError, LocationError},
    model::Fix,
    query::results_url,
    render::Render,
};

pub const BUTTON_LABEL: &str = "Use My Location";
pub const BUTTON_BUSY_LABEL: &str = "Getting location...";
pub const REQUESTING_PERMISSION: &str = "Requesting location permission...";
pub const LOCATION_FOUND: &str = "Location found! Getting weather data...";
pub const PROBE_FAILED: &str = "Failed to get weather data. Please try again.";

/// Options handed to the geolocation capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix that is still acceptable.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(5 * 60),
        }
    }
}

impl PositionOptions {
    pub fn accepts(&self, fix: &Fix, now: DateTime<Utc>) -> bool {
        match (now - fix.taken_at).to_std() {
            Ok(age) => age <= self.maximum_age,
            // taken in the future: clock skew, treat as fresh
            Err(_) => true,
        }
    }
}

/// Platform location capability.
#[async_trait]
pub trait Geolocation: Send + Sync + Debug {
    async fn current_position(&self, options: &PositionOptions) -> Result<Fix, LocationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Progress(String),
    Error(String),
}

/// State of the locate button and the status line under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorView {
    pub button_enabled: bool,
    pub button_label: String,
    pub status: Option<Status>,
}

impl Default for LocatorView {
    fn default() -> Self {
        Self { button_enabled: true, button_label: BUTTON_LABEL.to_string(), status: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorOutcome {
    /// Navigate to this results page URL.
    Redirect(String),
    /// Attempt over; the message is on screen and the button is usable again.
    Failed(String),
    /// A previous attempt already started a redirect.
    Busy,
}

#[derive(Debug)]
pub struct Locator {
    geolocation: Option<Arc<dyn Geolocation>>,
    api: Arc<dyn WeatherApi>,
    options: PositionOptions,
    view: LocatorView,
}

impl Locator {
    /// `geolocation` of `None` means the platform has no location capability.
    pub fn new(geolocation: Option<Arc<dyn Geolocation>>, api: Arc<dyn WeatherApi>) -> Self {
        Self { geolocation, api, options: PositionOptions::default(), view: LocatorView::default() }
    }

    pub fn with_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn view(&self) -> &LocatorView {
        &self.view
    }

    /// Handle a click on the locate button.
    pub async fn request_location<R: Render<LocatorView>>(
        &mut self,
        renderer: &mut R,
    ) -> LocatorOutcome {
        if !self.view.button_enabled {
            return LocatorOutcome::Busy;
        }

        let Some(geolocation) = self.geolocation.clone() else {
            return self.fail(LocationError::UnsupportedCapability.to_string(), renderer);
        };

        self.view.button_enabled = false;
        self.view.button_label = BUTTON_BUSY_LABEL.to_string();
        self.view.status = Some(Status::Progress(REQUESTING_PERMISSION.to_string()));
        renderer.render(&self.view);

        let fix = match self.acquire(geolocation.as_ref()).await {
            Ok(fix) => fix,
            Err(e) => {
                tracing::warn!(error = ?e, "geolocation failed");
                return self.fail(e.to_string(), renderer);
            }
        };

        self.view.status = Some(Status::Progress(LOCATION_FOUND.to_string()));
        renderer.render(&self.view);

        let (lat, lon) = (fix.lat.to_string(), fix.lon.to_string());
        match self.api.weather_by_coordinates(&lat, &lon).await {
            // any 2xx counts, readable or not; the results page fetches again and
            // judges the body itself
            Ok(_) | Err(FetchError::Decode(_)) => {
                let url = results_url(fix.lat, fix.lon);
                tracing::info!(%url, "location resolved, redirecting");
                LocatorOutcome::Redirect(url)
            }
            Err(FetchError::Api { body, .. }) => {
                self.fail(format!("Weather service error: {body}"), renderer)
            }
            Err(e) => {
                tracing::warn!(error = %e, "location probe failed");
                self.fail(PROBE_FAILED.to_string(), renderer)
            }
        }
    }

    async fn acquire(&self, geolocation: &dyn Geolocation) -> Result<Fix, LocationError> {
        let fix = tokio::time::timeout(
            self.options.timeout,
            geolocation.current_position(&self.options),
        )
        .await
        .map_err(|_| LocationError::Timeout)??;

        if !self.options.accepts(&fix, Utc::now()) {
            tracing::debug!(taken_at = %fix.taken_at, "discarding stale fix");
            return Err(LocationError::PositionUnavailable);
        }

        Ok(fix)
    }

    fn fail<R: Render<LocatorView>>(&mut self, message: String, renderer: &mut R) -> LocatorOutcome {
        self.view.button_enabled = true;
        self.view.button_label = BUTTON_LABEL.to_string();
        self.view.status = Some(Status::Error(message.clone()));
        renderer.render(&self.view);
        LocatorOutcome::Failed(message)
    }
}
