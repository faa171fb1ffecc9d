//! Error types for the protocol layer.
//!
//! Each crate in Punchcard defines its own error enum. When you see a
//! `ProtocolError`, you know the problem is in the shape of the data, not
//! in networking or in the session state machine.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: the server answered with HTML or plain text instead
    /// of JSON, or the JSON has the wrong shape.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// A value passed deserialization but violates a protocol rule,
    /// e.g. a latitude of 123.0.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}
