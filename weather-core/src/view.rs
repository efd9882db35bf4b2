//! Results page controller.
//!
//! Resolves a [`WeatherQuery`] from the page URL, fetches it and walks
//! `Idle -> Loading -> Result | Error`. Every state is pushed to a [`Render`]
//! implementation; [`ViewModel`] maps a state onto the fixed page element ids.

use std::sync::Arc;

use crate::{
    api::WeatherApi,
    error::FetchError,
    model::{QueryKind, WeatherQuery, WeatherResult},
    query::parse_query,
    render::Render,
};

pub mod ids {
    pub const LOADING: &str = "loading";
    pub const RESULTS: &str = "weather-results";
    pub const ERROR: &str = "error-message";

    pub const CITY_NAME: &str = "city-name";
    pub const TEMPERATURE: &str = "temperature";
    pub const DESCRIPTION: &str = "description";
    pub const FEELS_LIKE: &str = "feels-like";
    pub const HUMIDITY: &str = "humidity";
    pub const WIND_SPEED: &str = "wind-speed";
    pub const ERROR_TEXT: &str = "error-text";
}

pub const CITY_NOT_FOUND: &str = "City not found. Please check the spelling and try again.";
pub const LOCATION_NOT_FOUND: &str = "Weather data not available for your location.";
pub const SERVICE_UNAVAILABLE: &str = "Weather service temporarily unavailable.";
pub const NETWORK_ERROR: &str = "Network error - please try again later.";
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";
pub const CITY_FETCH_FAILED: &str = "Failed to fetch weather data. Please try again.";
pub const LOCATION_FETCH_FAILED: &str =
    "Failed to fetch weather data for your location. Please try again.";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Result(WeatherResult),
    Error(String),
}

impl UiState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, UiState::Result(_) | UiState::Error(_))
    }

    fn can_become(&self, next: &UiState) -> bool {
        match (self, next) {
            (UiState::Idle, UiState::Loading | UiState::Error(_)) => true,
            (UiState::Loading, next) => next.is_terminal(),
            _ => false,
        }
    }
}

/// Which of the three mutually exclusive regions are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Regions {
    pub loading: bool,
    pub results: bool,
    pub error: bool,
}

impl Regions {
    pub fn visible_count(&self) -> usize {
        [self.loading, self.results, self.error].into_iter().filter(|v| *v).count()
    }
}

/// A [`UiState`] laid out against the page's element ids.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewModel {
    pub regions: Regions,
    pub slots: Vec<(&'static str, String)>,
}

impl ViewModel {
    pub fn slot(&self, id: &str) -> Option<&str> {
        self.slots.iter().find(|(k, _)| *k == id).map(|(_, v)| v.as_str())
    }
}

impl From<&UiState> for ViewModel {
    fn from(state: &UiState) -> Self {
        match state {
            UiState::Idle => ViewModel::default(),
            UiState::Loading => ViewModel {
                regions: Regions { loading: true, ..Regions::default() },
                slots: Vec::new(),
            },
            UiState::Result(data) => ViewModel {
                regions: Regions { results: true, ..Regions::default() },
                slots: vec![
                    (ids::CITY_NAME, data.city.clone()),
                    (ids::TEMPERATURE, data.temperature.to_string()),
                    (ids::DESCRIPTION, data.description.clone()),
                    (ids::FEELS_LIKE, data.feels_like.to_string()),
                    (ids::HUMIDITY, data.humidity.to_string()),
                    (ids::WIND_SPEED, data.wind_speed.to_string()),
                ],
            },
            UiState::Error(message) => ViewModel {
                regions: Regions { error: true, ..Regions::default() },
                slots: vec![(ids::ERROR_TEXT, message.clone())],
            },
        }
    }
}

/// Text shown in the error region for a failed lookup.
///
/// A non-blank body from the server always wins over the status fallbacks. A
/// request that completed with an unreadable body reads the same as one that
/// never completed.
pub fn error_message(kind: QueryKind, err: &FetchError) -> String {
    match err {
        FetchError::Api { status, body } => {
            if !body.trim().is_empty() {
                return body.clone();
            }
            let fallback = match (status.as_u16(), kind) {
                (404, QueryKind::City) => CITY_NOT_FOUND,
                (404, QueryKind::Coordinates) => LOCATION_NOT_FOUND,
                (401, _) => SERVICE_UNAVAILABLE,
                (503, _) => NETWORK_ERROR,
                _ => GENERIC_ERROR,
            };
            fallback.to_string()
        }
        FetchError::Network(_) | FetchError::Decode(_) | FetchError::Url(_) => match kind {
            QueryKind::City => CITY_FETCH_FAILED,
            QueryKind::Coordinates => LOCATION_FETCH_FAILED,
        }
        .to_string(),
    }
}

/// One results page load. Holds at most one request in flight and never refetches.
#[derive(Debug)]
pub struct WeatherView {
    api: Arc<dyn WeatherApi>,
    state: UiState,
}

impl WeatherView {
    pub fn new(api: Arc<dyn WeatherApi>) -> Self {
        Self { api, state: UiState::Idle }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Page load: pick the lookup mode from `url` and run it to a terminal state.
    pub async fn load<R: Render<UiState>>(&mut self, url: &str, renderer: &mut R) -> &UiState {
        match parse_query(url) {
            Ok(WeatherQuery::City(name)) => self.fetch_by_city(&name, renderer).await,
            Ok(WeatherQuery::Coordinates { lat, lon }) => {
                self.fetch_by_coordinates(&lat, &lon, renderer).await
            }
            Err(e) => {
                tracing::debug!(url, "no usable query on results page");
                self.transition(UiState::Error(e.to_string()), renderer);
                &self.state
            }
        }
    }

    pub async fn fetch_by_city<R: Render<UiState>>(
        &mut self,
        name: &str,
        renderer: &mut R,
    ) -> &UiState {
        if !self.transition(UiState::Loading, renderer) {
            return &self.state;
        }
        let outcome = self.api.weather_by_city(name).await;
        self.finish(QueryKind::City, outcome, renderer)
    }

    pub async fn fetch_by_coordinates<R: Render<UiState>>(
        &mut self,
        lat: &str,
        lon: &str,
        renderer: &mut R,
    ) -> &UiState {
        if !self.transition(UiState::Loading, renderer) {
            return &self.state;
        }
        let outcome = self.api.weather_by_coordinates(lat, lon).await;
        self.finish(QueryKind::Coordinates, outcome, renderer)
    }

    fn finish<R: Render<UiState>>(
        &mut self,
        kind: QueryKind,
        outcome: Result<WeatherResult, FetchError>,
        renderer: &mut R,
    ) -> &UiState {
        let next = match outcome {
            Ok(data) => UiState::Result(data),
            Err(e) => UiState::Error(error_message(kind, &e)),
        };
        self.transition(next, renderer);
        &self.state
    }

    fn transition<R: Render<UiState>>(&mut self, next: UiState, renderer: &mut R) -> bool {
        if !self.state.can_become(&next) {
            tracing::warn!(from = ?self.state, to = ?next, "ignoring state change; reload the page to fetch again");
            return false;
        }
        tracing::debug!(to = ?next, "results page state");
        self.state = next;
        renderer.render(&self.state);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::Reading, render::NoRender};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct StubApi {
        calls: Mutex<Vec<String>>,
        fail_with: Option<(u16, &'static str)>,
    }

    impl StubApi {
        fn answer(&self) -> Result<WeatherResult, FetchError> {
            match self.fail_with {
                Some((code, body)) => Err(FetchError::Api {
                    status: StatusCode::from_u16(code).unwrap(),
                    body: body.to_string(),
                }),
                None => Ok(paris()),
            }
        }
    }

    #[async_trait]
    impl WeatherApi for StubApi {
        async fn weather_by_city(&self, city: &str) -> Result<WeatherResult, FetchError> {
            self.calls.lock().unwrap().push(format!("city:{city}"));
            self.answer()
        }

        async fn weather_by_coordinates(
            &self,
            lat: &str,
            lon: &str,
        ) -> Result<WeatherResult, FetchError> {
            self.calls.lock().unwrap().push(format!("coords:{lat},{lon}"));
            self.answer()
        }
    }

    fn paris() -> WeatherResult {
        WeatherResult {
            city: "Paris".into(),
            temperature: Reading::Number(18.0),
            description: "clear".into(),
            feels_like: Reading::Number(17.0),
            humidity: Reading::Number(60.0),
            wind_speed: Reading::Number(5.0),
        }
    }

    fn api_error(code: u16, body: &str) -> FetchError {
        FetchError::Api { status: StatusCode::from_u16(code).unwrap(), body: body.to_string() }
    }

    #[test]
    fn status_fallbacks_depend_on_path() {
        assert_eq!(error_message(QueryKind::City, &api_error(404, "")), CITY_NOT_FOUND);
        assert_eq!(
            error_message(QueryKind::Coordinates, &api_error(404, "  \n")),
            LOCATION_NOT_FOUND
        );
        assert_eq!(error_message(QueryKind::City, &api_error(401, "")), SERVICE_UNAVAILABLE);
        assert_eq!(error_message(QueryKind::Coordinates, &api_error(503, "")), NETWORK_ERROR);
        assert_eq!(error_message(QueryKind::City, &api_error(500, "")), GENERIC_ERROR);
    }

    #[test]
    fn unreadable_body_reads_as_failed_fetch() {
        let decode = || {
            FetchError::Decode(serde_json::from_str::<WeatherResult>("<html>oops</html>").unwrap_err())
        };

        assert_eq!(error_message(QueryKind::City, &decode()), CITY_FETCH_FAILED);
        assert_eq!(error_message(QueryKind::Coordinates, &decode()), LOCATION_FETCH_FAILED);
    }

    #[test]
    fn formatted_readings_fill_slots_unchanged() {
        let data = WeatherResult {
            temperature: "18.7°C".into(),
            humidity: "72%".into(),
            wind_speed: "6.8 m/s".into(),
            feels_like: "17.9°C".into(),
            ..paris()
        };
        let vm = ViewModel::from(&UiState::Result(data));

        assert_eq!(vm.slot(ids::TEMPERATURE), Some("18.7°C"));
        assert_eq!(vm.slot(ids::HUMIDITY), Some("72%"));
        assert_eq!(vm.slot(ids::WIND_SPEED), Some("6.8 m/s"));
        assert_eq!(vm.slot(ids::FEELS_LIKE), Some("17.9°C"));
    }

    #[test]
    fn non_blank_body_overrides_fallback() {
        let err = api_error(404, "City not found: Atlantis");
        assert_eq!(error_message(QueryKind::City, &err), "City not found: Atlantis");

        let err = api_error(418, " teapot ");
        assert_eq!(error_message(QueryKind::Coordinates, &err), " teapot ");
    }

    #[test]
    fn at_most_one_region_visible() {
        let states =
            [UiState::Idle, UiState::Loading, UiState::Result(paris()), UiState::Error("x".into())];
        for state in &states {
            assert!(ViewModel::from(state).regions.visible_count() <= 1, "{state:?}");
        }
    }

    #[test]
    fn result_fills_every_slot() {
        let vm = ViewModel::from(&UiState::Result(paris()));

        assert!(vm.regions.results && !vm.regions.error && !vm.regions.loading);
        assert_eq!(vm.slot(ids::CITY_NAME), Some("Paris"));
        assert_eq!(vm.slot(ids::TEMPERATURE), Some("18"));
        assert_eq!(vm.slot(ids::DESCRIPTION), Some("clear"));
        assert_eq!(vm.slot(ids::FEELS_LIKE), Some("17"));
        assert_eq!(vm.slot(ids::HUMIDITY), Some("60"));
        assert_eq!(vm.slot(ids::WIND_SPEED), Some("5"));
        assert_eq!(vm.slot(ids::ERROR_TEXT), None);
    }

    #[tokio::test]
    async fn missing_query_skips_network() {
        let api = Arc::new(StubApi::default());
        let mut view = WeatherView::new(api.clone());
        let mut rendered: Vec<UiState> = Vec::new();

        view.load("weather.html?lat=1", &mut rendered).await;

        assert!(api.calls.lock().unwrap().is_empty());
        assert_eq!(rendered, vec![UiState::Error("No city or location specified".into())]);
    }

    #[tokio::test]
    async fn city_load_goes_through_loading() {
        let api = Arc::new(StubApi::default());
        let mut view = WeatherView::new(api.clone());
        let mut rendered: Vec<UiState> = Vec::new();

        view.load("weather.html?city=Paris", &mut rendered).await;

        assert_eq!(*api.calls.lock().unwrap(), vec!["city:Paris".to_string()]);
        assert_eq!(rendered, vec![UiState::Loading, UiState::Result(paris())]);
    }

    #[tokio::test]
    async fn coordinates_error_uses_location_wording() {
        let api = Arc::new(StubApi { fail_with: Some((404, "")), ..StubApi::default() });
        let mut view = WeatherView::new(api.clone());

        let state = view.load("?lat=10.5&lon=-3&location=true", &mut NoRender).await;

        assert_eq!(*state, UiState::Error(LOCATION_NOT_FOUND.into()));
        assert_eq!(*api.calls.lock().unwrap(), vec!["coords:10.5,-3".to_string()]);
    }

    #[tokio::test]
    async fn non_numeric_coordinates_still_reach_the_backend() {
        let api = Arc::new(StubApi {
            fail_with: Some((400, "Invalid request: lat")),
            ..StubApi::default()
        });
        let mut view = WeatherView::new(api.clone());

        let state = view.load("?lat=abc&lon=2.50&location=true", &mut NoRender).await;

        assert_eq!(*state, UiState::Error("Invalid request: lat".into()));
        assert_eq!(*api.calls.lock().unwrap(), vec!["coords:abc,2.50".to_string()]);
    }

    #[tokio::test]
    async fn terminal_state_refuses_refetch() {
        let api = Arc::new(StubApi::default());
        let mut view = WeatherView::new(api.clone());
        let mut rendered: Vec<UiState> = Vec::new();

        view.fetch_by_city("Paris", &mut rendered).await;
        view.fetch_by_city("Rome", &mut rendered).await;

        assert_eq!(api.calls.lock().unwrap().len(), 1);
        assert_eq!(rendered.len(), 2);
        assert_eq!(*view.state(), UiState::Result(paris()));
    }
}
