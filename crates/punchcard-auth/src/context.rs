//! The authentication context: who is logged in right now.
//!
//! # Concurrency note
//!
//! The identity lives in a `tokio::sync::watch` channel. Readers get a
//! cheap clone of the latest value, and presentation code can `subscribe()`
//! to be woken on login/logout instead of polling. Every write goes
//! through [`AuthContext::replace`].

use std::sync::Arc;

use punchcard_protocol::Identity;
use tokio::sync::watch;

use crate::{AuthError, Authenticator};

/// Holds the current identity (or `None` when logged out).
///
/// Cloning an `AuthContext` gives another handle to the *same* state, so
/// the session layer and the presentation layer can each keep one.
#[derive(Debug, Clone)]
pub struct AuthContext {
    identity: Arc<watch::Sender<Option<Identity>>>,
}

impl AuthContext {
    /// Creates a logged-out context.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            identity: Arc::new(tx),
        }
    }

    /// Creates a context that is already logged in as `identity`.
    pub fn logged_in(identity: Identity) -> Self {
        let ctx = Self::new();
        ctx.identity.send_replace(Some(identity));
        ctx
    }

    /// Checks credentials with `authenticator` and, on success, makes the
    /// returned identity current.
    ///
    /// A failed login leaves the context exactly as it was.
    ///
    /// # Errors
    /// Whatever the authenticator returns, typically
    /// [`AuthError::InvalidCredentials`].
    pub async fn login<A: Authenticator>(
        &self,
        authenticator: &A,
        username: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        match authenticator.authenticate(username, password).await {
            Ok(identity) => {
                self.replace(Some(identity.clone()));
                Ok(identity)
            }
            Err(e) => {
                tracing::warn!(username, error = %e, "login failed");
                Err(e)
            }
        }
    }

    /// Clears the current identity. Returns who was logged in, if anyone.
    pub fn logout(&self) -> Option<Identity> {
        self.replace(None)
    }

    /// Makes `identity` current without checking credentials, or logs out
    /// with `None`. Returns who was logged in before.
    ///
    /// For callers that authenticated on their own and must switch the
    /// identity in the same step as their own state.
    pub fn replace(&self, identity: Option<Identity>) -> Option<Identity> {
        if let Some(who) = &identity {
            tracing::info!(employee_id = %who.id, name = %who.name, "logged in");
        }
        let logging_out = identity.is_none();
        let previous = self.identity.send_replace(identity);
        if let (true, Some(who)) = (logging_out, &previous) {
            tracing::info!(employee_id = %who.id, "logged out");
        }
        previous
    }

    /// A clone of the current identity.
    pub fn current(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.borrow().is_some()
    }

    /// A receiver that sees every login and logout.
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.subscribe()
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticAuthenticator;

    #[test]
    fn test_new_context_is_logged_out() {
        let ctx = AuthContext::new();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.current(), None);
    }

    #[tokio::test]
    async fn test_login_valid_credentials_sets_identity() {
        let ctx = AuthContext::new();
        let auth = StaticAuthenticator::development();

        let who = ctx.login(&auth, "test", "test").await.unwrap();

        assert_eq!(who.id.as_str(), "EMP001");
        assert_eq!(ctx.current(), Some(who));
    }

    #[tokio::test]
    async fn test_login_invalid_credentials_keeps_previous_identity() {
        let ctx = AuthContext::logged_in(Identity::new("EMP042", "Grace"));
        let auth = StaticAuthenticator::development();

        let result = ctx.login(&auth, "test", "nope").await;

        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert_eq!(ctx.current().unwrap().id.as_str(), "EMP042");
    }

    #[test]
    fn test_logout_clears_and_returns_previous() {
        let ctx = AuthContext::logged_in(Identity::new("EMP001", "test"));

        let previous = ctx.logout();

        assert_eq!(previous.unwrap().id.as_str(), "EMP001");
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.logout(), None, "second logout is a no-op");
    }

    #[test]
    fn test_replace_switches_identity_and_returns_previous() {
        let ctx = AuthContext::logged_in(Identity::new("EMP001", "test"));

        let previous = ctx.replace(Some(Identity::new("EMP042", "Asha")));

        assert_eq!(previous.unwrap().id.as_str(), "EMP001");
        assert_eq!(ctx.current().unwrap().id.as_str(), "EMP042");
    }

    #[test]
    fn test_clones_share_state() {
        let ctx = AuthContext::new();
        let other = ctx.clone();

        ctx.identity.send_replace(Some(Identity::new("EMP001", "test")));

        assert!(other.is_authenticated());
    }

    #[tokio::test]
    async fn test_subscribe_observes_login_and_logout() {
        let ctx = AuthContext::new();
        let mut rx = ctx.subscribe();
        let auth = StaticAuthenticator::development();

        ctx.login(&auth, "test", "test").await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_some());

        ctx.logout();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }
}
