use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single geolocation reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    pub lat: f64,
    pub lon: f64,
    pub taken_at: DateTime<Utc>,
}

impl Fix {
    pub fn new(lat: f64, lon: f64, taken_at: DateTime<Utc>) -> Self {
        Self { lat, lon, taken_at }
    }
}

/// What the results page was asked to show.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    City(String),
    /// Kept as written in the URL; the backend validates them.
    Coordinates { lat: String, lon: String },
}

impl WeatherQuery {
    pub fn kind(&self) -> QueryKind {
        match self {
            WeatherQuery::City(_) => QueryKind::City,
            WeatherQuery::Coordinates { .. } => QueryKind::Coordinates,
        }
    }
}

/// Which lookup path a request went through. Error wording differs per path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    City,
    Coordinates,
}

/// A measured value as the backend sent it: a bare number or preformatted text
/// such as `"18.7°C"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(f64),
    Text(String),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Number(n) => write!(f, "{n}"),
            Reading::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Reading::Number(value)
    }
}

impl From<&str> for Reading {
    fn from(value: &str) -> Self {
        Reading::Text(value.to_string())
    }
}

/// Successful body of both weather endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResult {
    pub city: String,
    pub temperature: Reading,
    pub description: String,
    pub feels_like: Reading,
    pub humidity: Reading,
    pub wind_speed: Reading,
}
