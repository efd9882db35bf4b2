use reqwest::StatusCode;

/// Failures of the geolocation capability. `Display` is the text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation is not supported by this browser.")]
    UnsupportedCapability,
    #[error("Location access denied. Please enable location permissions and try again.")]
    PermissionDenied,
    #[error("Location information is unavailable.")]
    PositionUnavailable,
    #[error("Location request timed out. Please try again.")]
    Timeout,
    #[error("An unknown error occurred while getting your location.")]
    Unknown,
}

/// Failures of a weather API call.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("weather API returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// The request never completed (DNS, connect, timeout, broken body).
    #[error("weather API request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// 2xx, but the body was not a weather result.
    #[error("failed to decode weather response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid weather API URL: {0}")]
    Url(String),
}

/// The results page URL did not select a lookup mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("No city or location specified")]
    Missing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_errors_render_user_messages() {
        assert_eq!(
            LocationError::Timeout.to_string(),
            "Location request timed out. Please try again."
        );
        assert_eq!(
            LocationError::UnsupportedCapability.to_string(),
            "Geolocation is not supported by this browser."
        );
    }

    #[test]
    fn missing_query_message() {
        assert_eq!(QueryError::Missing.to_string(), "No city or location specified");
    }
}
