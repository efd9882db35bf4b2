use async_trait::async_trait;
use chrono::Utc;
use weather_core::{Fix, Geolocation, LocationError, PositionOptions};

/// Position supplied on the command line. A terminal has no location sensor of its own.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition {
    pub lat: f64,
    pub lon: f64,
}

#[async_trait]
impl Geolocation for FixedPosition {
    async fn current_position(&self, options: &PositionOptions) -> Result<Fix, LocationError> {
        tracing::debug!(?options, lat = self.lat, lon = self.lon, "using position from arguments");

        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lon) {
            return Err(LocationError::PositionUnavailable);
        }

        Ok(Fix::new(self.lat, self.lon, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_range_position_is_returned() {
        let pos = FixedPosition { lat: 51.5, lon: -0.12 };
        let fix = pos.current_position(&PositionOptions::default()).await.unwrap();
        assert_eq!((fix.lat, fix.lon), (51.5, -0.12));
    }

    #[tokio::test]
    async fn out_of_range_position_is_unavailable() {
        let pos = FixedPosition { lat: 91.0, lon: 0.0 };
        let err = pos.current_position(&PositionOptions::default()).await.unwrap_err();
        assert_eq!(err, LocationError::PositionUnavailable);
    }
}
