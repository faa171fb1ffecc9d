//! Providers that don't need a sensor.

use punchcard_protocol::GeoCoordinate;

use crate::{GeoError, GeolocationProvider};

/// Always reports the same coordinate.
///
/// Useful for a wall-mounted kiosk whose position never changes, for
/// desktop builds with no GPS, and for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coordinate: GeoCoordinate,
}

impl FixedLocation {
    pub fn new(coordinate: GeoCoordinate) -> Self {
        Self { coordinate }
    }

    /// Builds the provider from raw degrees.
    ///
    /// # Errors
    /// Returns [`GeoError::Unavailable`] if the values are not a valid
    /// coordinate.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        GeoCoordinate::new(latitude, longitude)
            .map(Self::new)
            .map_err(|e| GeoError::Unavailable(e.to_string()))
    }

    pub fn coordinate(&self) -> GeoCoordinate {
        self.coordinate
    }
}

impl GeolocationProvider for FixedLocation {
    async fn current_coordinate(&self) -> Result<GeoCoordinate, GeoError> {
        tracing::debug!(coordinate = %self.coordinate, "fixed location reading");
        Ok(self.coordinate)
    }
}

/// A platform with no location capability. Every request fails with
/// [`GeoError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

impl GeolocationProvider for NoGeolocation {
    async fn current_coordinate(&self) -> Result<GeoCoordinate, GeoError> {
        tracing::debug!("geolocation requested on a platform without it");
        Err(GeoError::Unsupported)
    }
}
