/// Errors that can occur while talking to the attendance API.
///
/// The split between [`Rejected`](Self::Rejected) and
/// [`Unreachable`](Self::Unreachable) matters to callers: a rejection means
/// the server saw the punch and said no, while an unreachable server never
/// saw it at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The server answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// The server's message, or a fixed fallback when it sent none.
        message: String,
    },

    /// No response was received (DNS, connect, TLS, timeout).
    #[error("attendance API unreachable: {0}")]
    Unreachable(String),

    /// The client could not be built from its configuration
    /// (malformed base URL, TLS backend failure).
    #[error("invalid attendance API configuration: {0}")]
    InvalidConfig(String),
}
