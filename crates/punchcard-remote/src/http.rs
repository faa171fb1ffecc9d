//! HTTP implementation of [`AttendanceApi`] using `reqwest`.

use punchcard_protocol::{AttendanceRecord, ErrorBody};
use reqwest::{Client, Url};

use crate::{AttendanceApi, RemoteConfig, RemoteError};

/// Posts attendance records as JSON to a single endpoint.
///
/// Cheap to clone: `reqwest::Client` is an `Arc` around a connection pool.
#[derive(Debug, Clone)]
pub struct HttpAttendanceClient {
    client: Client,
    url: Url,
}

impl HttpAttendanceClient {
    /// Builds a client for the endpoint described by `config`.
    ///
    /// # Errors
    /// Returns [`RemoteError::InvalidConfig`] if the endpoint URL does not
    /// parse or the HTTP client cannot be created.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let raw = config.endpoint_url();
        let url = Url::parse(&raw)
            .map_err(|e| RemoteError::InvalidConfig(format!("{raw}: {e}")))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::InvalidConfig(e.to_string()))?;

        tracing::info!(%url, "attendance client configured");
        Ok(Self { client, url })
    }

    /// The endpoint every record is POSTed to.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl AttendanceApi for HttpAttendanceClient {
    async fn submit(&self, record: &AttendanceRecord) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(record)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(
                    employee_id = %record.employee_id,
                    error = %e,
                    "attendance request failed before a response"
                );
                RemoteError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(
                employee_id = %record.employee_id,
                direction = %record.direction,
                status = status.as_u16(),
                "attendance record accepted"
            );
            return Ok(());
        }

        // The server answered, so this is a rejection no matter what the
        // body looks like. A body we can't read or decode just means we
        // fall back to the generic message.
        let server_message = match response.bytes().await {
            Ok(body) => ErrorBody::decode(&body)
                .ok()
                .and_then(|b| b.message().map(str::to_owned)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to read error body");
                None
            }
        };
        let message = server_message
            .unwrap_or_else(|| record.direction.fallback_message().to_string());

        tracing::debug!(
            employee_id = %record.employee_id,
            status = status.as_u16(),
            %message,
            "attendance record rejected"
        );
        Err(RemoteError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
