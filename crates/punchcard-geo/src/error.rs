/// Errors a [`GeolocationProvider`](crate::GeolocationProvider) can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    /// The platform has no location capability at all.
    #[error("geolocation is not supported")]
    Unsupported,

    /// The user (or OS policy) refused location access.
    #[error("location permission denied")]
    PermissionDenied,

    /// The capability exists but could not produce a reading
    /// (no fix, provider timeout, bogus coordinates).
    #[error("location unavailable: {0}")]
    Unavailable(String),
}
