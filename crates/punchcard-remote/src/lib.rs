//! Attendance API client layer for Punchcard.
//!
//! Provides the [`AttendanceApi`] trait that the session state machine
//! submits punches through, and an HTTP implementation of it.
//!
//! # Feature Flags
//!
//! - `http` (default) — [`HttpAttendanceClient`] via `reqwest`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::RemoteError;
#[cfg(feature = "http")]
pub use http::HttpAttendanceClient;

use std::time::Duration;

use punchcard_protocol::AttendanceRecord;

/// Default attendance API host.
pub const DEFAULT_BASE_URL: &str = "https://people-pilot.onrender.com";

/// Default path of the attendance endpoint.
pub const DEFAULT_ENDPOINT: &str = "/api/attendance";

/// Where and how to reach the attendance API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Scheme and host, e.g. `https://people-pilot.onrender.com`.
    pub base_url: String,

    /// Path of the attendance endpoint, appended to `base_url`.
    pub endpoint: String,

    /// Upper bound on one request, connect through body.
    ///
    /// Default: 30 seconds. Hitting it is reported as
    /// [`RemoteError::Unreachable`].
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl RemoteConfig {
    /// Full endpoint URL with exactly one `/` between host and path.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }
}

/// Submits punch records to the system of record.
///
/// Implementations perform exactly one round trip per call and never retry;
/// retry policy, if any, belongs to the caller.
pub trait AttendanceApi: Send + Sync + 'static {
    /// Sends one attendance record.
    ///
    /// # Returns
    /// - `Ok(())` — the server accepted the record (2xx)
    /// - `Err(RemoteError::Rejected)` — the server answered with an error
    /// - `Err(RemoteError::Unreachable)` — no answer at all
    fn submit(
        &self,
        record: &AttendanceRecord,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_config_default_points_at_attendance_api() {
        let config = RemoteConfig::default();
        assert_eq!(
            config.endpoint_url(),
            "https://people-pilot.onrender.com/api/attendance"
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_endpoint_url_normalizes_slashes() {
        let config = RemoteConfig {
            base_url: "http://127.0.0.1:9000/".into(),
            endpoint: "/api/attendance".into(),
            ..RemoteConfig::default()
        };
        assert_eq!(config.endpoint_url(), "http://127.0.0.1:9000/api/attendance");

        let config = RemoteConfig {
            base_url: "http://127.0.0.1:9000".into(),
            endpoint: "api/attendance".into(),
            ..RemoteConfig::default()
        };
        assert_eq!(config.endpoint_url(), "http://127.0.0.1:9000/api/attendance");
    }

    #[test]
    fn test_remote_error_display_includes_status_and_message() {
        let err = RemoteError::Rejected {
            status: 500,
            message: "server busy".into(),
        };
        assert_eq!(err.to_string(), "server busy (HTTP 500)");
    }
}
