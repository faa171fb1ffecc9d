//! `Punchcard` builder and application handle.
//!
//! Ties the layers together: authentication decides *who* punches, the
//! geolocation provider decides *where*, the attendance API records it,
//! and the clock keeps the local session.

use std::time::Duration;

use punchcard_auth::{AuthContext, Authenticator};
use punchcard_clock::{PunchClock, SessionState, SessionStatus};
use punchcard_geo::GeolocationProvider;
use punchcard_protocol::Identity;
use punchcard_remote::{AttendanceApi, HttpAttendanceClient, RemoteConfig};
use tokio::sync::watch;

use crate::PunchcardError;

/// Builder for a [`Punchcard`] that talks to the attendance API over HTTP.
///
/// # Example
///
/// ```rust,ignore
/// let app = Punchcard::builder()
///     .api_url("http://127.0.0.1:3000")
///     .timeout(Duration::from_secs(5))
///     .build(StaticAuthenticator::development(), NoGeolocation)?;
/// ```
pub struct PunchcardBuilder {
    remote: RemoteConfig,
}

impl PunchcardBuilder {
    /// Creates a builder pointing at the default attendance API.
    pub fn new() -> Self {
        Self {
            remote: RemoteConfig::default(),
        }
    }

    /// Sets the API base URL (scheme and host, optional port).
    pub fn api_url(mut self, base_url: &str) -> Self {
        self.remote.base_url = base_url.to_string();
        self
    }

    /// Sets the attendance endpoint path.
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.remote.endpoint = endpoint.to_string();
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.remote.timeout = timeout;
        self
    }

    /// Replaces the whole remote configuration.
    pub fn remote_config(mut self, config: RemoteConfig) -> Self {
        self.remote = config;
        self
    }

    /// Builds the HTTP client and the application handle.
    ///
    /// # Errors
    /// [`PunchcardError::Remote`] if the URL is malformed or the HTTP
    /// client cannot be created.
    pub fn build<U, G>(
        self,
        authenticator: U,
        geo: G,
    ) -> Result<Punchcard<U, G, HttpAttendanceClient>, PunchcardError>
    where
        U: Authenticator,
        G: GeolocationProvider,
    {
        let api = HttpAttendanceClient::new(&self.remote)?;
        tracing::debug!(url = %api.url(), "attendance client ready");
        Ok(Punchcard::with_api(authenticator, geo, api))
    }
}

impl Default for PunchcardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An attendance client for one device.
///
/// Owns the login state and the punch clock. All punches go through the
/// identity currently logged in.
pub struct Punchcard<U, G, A> {
    authenticator: U,
    auth: AuthContext,
    clock: PunchClock<G, A>,
}

impl Punchcard<(), (), ()> {
    /// Creates a new builder.
    pub fn builder() -> PunchcardBuilder {
        PunchcardBuilder::new()
    }
}

impl<U, G, A> Punchcard<U, G, A>
where
    U: Authenticator,
    G: GeolocationProvider,
    A: AttendanceApi,
{
    /// Assembles a handle around any attendance API implementation.
    /// Nobody is logged in yet.
    pub fn with_api(authenticator: U, geo: G, api: A) -> Self {
        let auth = AuthContext::new();
        let clock = PunchClock::new(geo, api, auth.clone());
        Self {
            authenticator,
            auth,
            clock,
        }
    }

    /// Logs in. When the employee changes, the previous employee's
    /// session and history are cleared in the same step.
    ///
    /// Credentials are checked first, without blocking punches. The
    /// identity switch then happens only if no punch is running.
    ///
    /// # Errors
    /// - [`PunchcardError::Auth`] on bad credentials
    /// - [`PunchcardError::Punch`] with `InFlight` if a punch is still
    ///   running
    ///
    /// Either way the identity and the session are left as they were.
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity, PunchcardError> {
        let identity = self
            .authenticator
            .authenticate(username, password)
            .await
            .inspect_err(|e| tracing::warn!(username, error = %e, "login failed"))?;
        self.clock
            .switch_identity(Some(identity.clone()))
            .inspect_err(|e| {
                tracing::warn!(employee_id = %identity.id, error = %e, "login refused")
            })?;
        Ok(identity)
    }

    /// Clears the session state and logs out. Returns who was logged in,
    /// if anyone.
    ///
    /// # Errors
    /// [`PunchcardError::Punch`] with `InFlight` if a punch is still
    /// running; the login and the session are kept in that case.
    pub fn logout(&self) -> Result<Option<Identity>, PunchcardError> {
        Ok(self.clock.switch_identity(None)?)
    }

    pub fn identity(&self) -> Option<Identity> {
        self.auth.current()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub async fn punch_in(&self) -> Result<(), PunchcardError> {
        Ok(self.clock.punch_in().await?)
    }

    pub async fn punch_out(&self) -> Result<(), PunchcardError> {
        Ok(self.clock.punch_out().await?)
    }

    /// Punches out if working, in otherwise. Returns the new status.
    pub async fn toggle(&self) -> Result<SessionStatus, PunchcardError> {
        Ok(self.clock.toggle().await?)
    }

    pub fn status(&self) -> SessionStatus {
        self.clock.status()
    }

    pub fn is_busy(&self) -> bool {
        self.clock.is_busy()
    }

    pub fn snapshot(&self) -> SessionState {
        self.clock.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.clock.subscribe()
    }

    /// The underlying clock, for callers that want
    /// [`PunchError`](punchcard_clock::PunchError) directly.
    pub fn clock(&self) -> &PunchClock<G, A> {
        &self.clock
    }
}
