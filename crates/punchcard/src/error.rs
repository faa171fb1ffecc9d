//! Unified error type for Punchcard.

use punchcard_auth::AuthError;
use punchcard_clock::PunchError;
use punchcard_geo::GeoError;
use punchcard_protocol::ProtocolError;
use punchcard_remote::RemoteError;

/// Top-level error that wraps all crate-specific errors.
///
/// `?` converts any sub-crate error into this one, so application code
/// can stay on a single error type.
#[derive(Debug, thiserror::Error)]
pub enum PunchcardError {
    /// Invalid wire data or an out-of-range value.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Location could not be obtained.
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// The attendance API client could not be built or reached.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Login failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A punch (or a reset) was refused or failed.
    #[error(transparent)]
    Punch(#[from] PunchError),
}

impl PunchcardError {
    /// The punch failure inside, if this is one.
    pub fn as_punch(&self) -> Option<&PunchError> {
        match self {
            Self::Punch(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidValue("latitude 91".into());
        let top: PunchcardError = err.into();
        assert!(matches!(top, PunchcardError::Protocol(_)));
        assert!(top.to_string().contains("latitude 91"));
    }

    #[test]
    fn test_from_geo_error() {
        let top: PunchcardError = GeoError::PermissionDenied.into();
        assert!(matches!(top, PunchcardError::Geo(_)));
    }

    #[test]
    fn test_from_remote_error() {
        let top: PunchcardError = RemoteError::InvalidConfig("bad url".into()).into();
        assert!(matches!(top, PunchcardError::Remote(_)));
    }

    #[test]
    fn test_from_auth_error() {
        let top: PunchcardError = AuthError::InvalidCredentials.into();
        assert!(matches!(top, PunchcardError::Auth(_)));
        assert_eq!(top.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_from_punch_error_is_transparent() {
        let top: PunchcardError = PunchError::RemoteRejected("server busy".into()).into();
        assert_eq!(top.to_string(), "server busy");
        assert_eq!(
            top.as_punch(),
            Some(&PunchError::RemoteRejected("server busy".into()))
        );
    }

    #[test]
    fn test_as_punch_on_other_variant_is_none() {
        let top: PunchcardError = AuthError::InvalidCredentials.into();
        assert!(top.as_punch().is_none());
    }
}
