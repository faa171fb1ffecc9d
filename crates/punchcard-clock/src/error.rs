//! Error types for the clock layer.

use punchcard_geo::GeoError;
use punchcard_remote::RemoteError;

/// Every way a punch can fail.
///
/// Whatever the variant, the session state after the failed call is
/// exactly what it was before it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PunchError {
    /// Nobody is logged in, or the one logged in is not the employee who
    /// punched in. Nothing was attempted.
    #[error("not logged in")]
    Unauthenticated,

    /// The device could not produce a location (no capability, no fix).
    #[error("location unavailable: {0}")]
    GeolocationUnavailable(String),

    /// The user refused location access.
    #[error("location permission denied")]
    GeolocationDenied,

    /// The attendance API was never reached.
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    /// The attendance API answered and refused the punch. The payload is
    /// the server's message, or a generic one if it sent none.
    #[error("{0}")]
    RemoteRejected(String),

    /// Another punch is still waiting on location or the network.
    #[error("a punch is already in progress")]
    InFlight,

    /// `punch_in()` was called while a session is already open.
    #[error("already punched in")]
    AlreadyPunchedIn,
}

impl From<GeoError> for PunchError {
    fn from(err: GeoError) -> Self {
        match err {
            GeoError::PermissionDenied => Self::GeolocationDenied,
            GeoError::Unsupported => Self::GeolocationUnavailable(
                "geolocation is not supported".into(),
            ),
            GeoError::Unavailable(reason) => Self::GeolocationUnavailable(reason),
        }
    }
}

impl From<RemoteError> for PunchError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Rejected { message, .. } => Self::RemoteRejected(message),
            RemoteError::Unreachable(reason) => Self::NetworkUnreachable(reason),
            // A client that can't be configured never reaches the server.
            RemoteError::InvalidConfig(reason) => Self::NetworkUnreachable(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_geo_permission_denied() {
        let err: PunchError = GeoError::PermissionDenied.into();
        assert_eq!(err, PunchError::GeolocationDenied);
    }

    #[test]
    fn test_from_geo_unsupported_is_unavailable() {
        let err: PunchError = GeoError::Unsupported.into();
        assert!(matches!(err, PunchError::GeolocationUnavailable(_)));
    }

    #[test]
    fn test_from_geo_unavailable_keeps_reason() {
        let err: PunchError = GeoError::Unavailable("no fix".into()).into();
        assert_eq!(err, PunchError::GeolocationUnavailable("no fix".into()));
    }

    #[test]
    fn test_from_remote_rejected_keeps_message_only() {
        let err: PunchError = RemoteError::Rejected {
            status: 500,
            message: "server busy".into(),
        }
        .into();
        assert_eq!(err, PunchError::RemoteRejected("server busy".into()));
        assert_eq!(err.to_string(), "server busy");
    }

    #[test]
    fn test_from_remote_invalid_config_is_unreachable() {
        let err: PunchError = RemoteError::InvalidConfig("bad url".into()).into();
        assert_eq!(err, PunchError::NetworkUnreachable("bad url".into()));
    }

    #[test]
    fn test_from_remote_unreachable() {
        let err: PunchError = RemoteError::Unreachable("refused".into()).into();
        assert_eq!(err, PunchError::NetworkUnreachable("refused".into()));
    }
}
