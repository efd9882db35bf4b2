use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use crate::{error::FetchError, model::WeatherResult};

use super::{WeatherApi, truncate_body};

/// Talks to the weather backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpWeatherApi {
    base_url: Url,
    http: Client,
}

impl HttpWeatherApi {
    /// `timeout` of `None` lets a request run until the connection gives up.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::Url(format!("'{base_url}': {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(FetchError::Url(format!("'{base_url}' cannot be used as a base URL")));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self { base_url, http: builder.build()? })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Endpoint URL below `/api/weather`. Each segment is percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Url(format!("'{}' cannot be used as a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "weather"])
            .extend(segments);
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<WeatherResult, FetchError> {
        tracing::info!(%url, "requesting weather");

        let res = self.http.get(url.clone()).send().await.inspect_err(|e| {
            tracing::warn!(%url, error = %e, "weather request did not complete");
        })?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::warn!(%url, %status, body = %truncate_body(&body), "weather request rejected");
            return Err(FetchError::Api { status, body });
        }

        let parsed: WeatherResult = serde_json::from_str(&body).inspect_err(|e| {
            tracing::warn!(%url, error = %e, body = %truncate_body(&body), "unexpected weather body");
        })?;

        Ok(parsed)
    }
}

#[async_trait]
impl WeatherApi for HttpWeatherApi {
    async fn weather_by_city(&self, city: &str) -> Result<WeatherResult, FetchError> {
        let url = self.endpoint(&[city])?;
        self.fetch(url).await
    }

    async fn weather_by_coordinates(
        &self,
        lat: &str,
        lon: &str,
    ) -> Result<WeatherResult, FetchError> {
        let mut url = self.endpoint(&["coordinates"])?;
        url.query_pairs_mut().append_pair("lat", lat).append_pair("lon", lon);
        self.fetch(url).await
    }
}
