//! Navigation contract between the home page and the results page.
//!
//! The results page selects its lookup mode from query parameters:
//! `city=<name>` or `lat=<lat>&lon=<lon>&location=true`.

use reqwest::Url;

use crate::{error::QueryError, model::WeatherQuery};

pub const HOME_PAGE: &str = "index.html";
pub const RESULTS_PAGE: &str = "weather.html";

/// URL the home page redirects to after a successful location probe.
pub fn results_url(lat: f64, lon: f64) -> String {
    format!("{RESULTS_PAGE}?lat={lat}&lon={lon}&location=true")
}

/// Resolve a results page URL (absolute, relative, or a bare query string).
///
/// `city` wins over coordinates. Coordinates need all of `lat`, `lon` and
/// `location` to be present and non-empty; none of the three values is inspected.
pub fn parse_query(input: &str) -> Result<WeatherQuery, QueryError> {
    let params = QueryParams::parse(input);

    if let Some(city) = params.get("city") {
        return Ok(WeatherQuery::City(city));
    }

    match (params.get("lat"), params.get("lon"), params.get("location")) {
        (Some(lat), Some(lon), Some(_)) => Ok(WeatherQuery::Coordinates { lat, lon }),
        _ => Err(QueryError::Missing),
    }
}

struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    fn parse(input: &str) -> Self {
        let without_fragment = input.split('#').next().unwrap_or_default();

        let query = match without_fragment.split_once('?') {
            Some((_, q)) => q,
            None if without_fragment.contains('=') => without_fragment,
            None => "",
        };

        let pairs = Url::parse(&format!("http://localhost/?{query}"))
            .map(|url| url.query_pairs().into_owned().collect())
            .unwrap_or_default();

        Self(pairs)
    }

    /// First value for `name`, treating an empty value as absent.
    fn get(&self, name: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
            .filter(|v| !v.is_empty())
    }
}
