//! Credential check hook.
//!
//! Punchcard doesn't implement a real identity provider; that's the job of
//! your HR system, an OAuth server, or whatever the company uses.
//!
//! Instead, Punchcard defines the [`Authenticator`] trait: a single async
//! method that takes a username and password and returns an [`Identity`]
//! or an error. [`StaticAuthenticator`] is an in-memory implementation for
//! development, kiosks, and tests.

use std::collections::HashMap;

use punchcard_protocol::Identity;

use crate::AuthError;

/// Validates credentials and returns the identity they belong to.
///
/// # Trait bounds
///
/// - `Send + Sync` → the authenticator can be shared across async tasks.
/// - `'static` → it doesn't borrow temporary data; it lives as long as the
///   application.
///
/// # Example
///
/// ```rust
/// use punchcard_auth::{AuthError, Authenticator, Identity};
///
/// /// Accepts anyone whose password is their username reversed.
/// /// Only for demos!
/// struct MirrorAuthenticator;
///
/// impl Authenticator for MirrorAuthenticator {
///     async fn authenticate(
///         &self,
///         username: &str,
///         password: &str,
///     ) -> Result<Identity, AuthError> {
///         let reversed: String = username.chars().rev().collect();
///         if reversed != password {
///             return Err(AuthError::InvalidCredentials);
///         }
///         Ok(Identity::new(username.to_uppercase(), username))
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Checks the credentials.
    ///
    /// # Returns
    /// - `Ok(Identity)` — who this user is
    /// - `Err(AuthError::InvalidCredentials)` — unknown user or wrong
    ///   password
    /// - `Err(AuthError::Backend)` — the check itself could not run
    fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<Identity, AuthError>> + Send;
}

/// An in-memory table of `username → (password, identity)`.
///
/// Passwords are compared in plain text. Fine for a development build or a
/// test; not something to ship with real credentials in it.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthenticator {
    users: HashMap<String, (String, Identity)>,
}

impl StaticAuthenticator {
    /// Creates an authenticator that knows no users.
    pub fn new() -> Self {
        Self::default()
    }

    /// The development account: `test` / `test`, employee `EMP001`.
    pub fn development() -> Self {
        Self::new().with_user("test", "test", Identity::new("EMP001", "test"))
    }

    /// Registers a user. A later registration for the same username
    /// replaces the earlier one.
    pub fn with_user(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        identity: Identity,
    ) -> Self {
        self.users
            .insert(username.into(), (password.into(), identity));
        self
    }
}

impl Authenticator for StaticAuthenticator {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        match self.users.get(username) {
            Some((expected, identity)) if expected == password => {
                Ok(identity.clone())
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}
