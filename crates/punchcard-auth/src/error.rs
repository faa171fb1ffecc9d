//! Error types for the auth layer.

/// Errors that can occur while logging in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Unknown user or wrong password. Deliberately doesn't say which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The authenticator itself failed (identity provider down, etc.).
    #[error("authentication backend failed: {0}")]
    Backend(String),
}
