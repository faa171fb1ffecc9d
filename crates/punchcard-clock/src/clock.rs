//! The punch clock itself.
//!
//! # Concurrency note
//!
//! Each punch is one async call with exactly two suspension points: the
//! geolocation request and the attendance API request. The session
//! snapshot is only touched after both have resolved, in a single
//! `watch::Sender::send_modify`, so observers never see a half-applied
//! transition.
//!
//! At most one punch runs at a time. A second call made while the first is
//! still waiting fails fast with [`PunchError::InFlight`]; it does not
//! queue, and it does not touch location, network, or state.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use punchcard_auth::AuthContext;
use punchcard_geo::GeolocationProvider;
use punchcard_protocol::{AttendanceRecord, Identity, PunchDirection};
use punchcard_remote::AttendanceApi;
use tokio::sync::watch;

use crate::{OpenEntry, PunchError, SessionState, SessionStatus};

/// Drop guard that marks the clock as busy for the lifetime of a punch.
///
/// Releasing in `Drop` means the flag is cleared on every exit path:
/// success, early `?` return, and a caller dropping the future halfway
/// through.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, PunchError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PunchError::InFlight)?;
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// The session state machine.
///
/// Owns the [`SessionState`] and is its only writer. Presentation code
/// reads it through [`snapshot`](Self::snapshot) or
/// [`subscribe`](Self::subscribe) and drives it through
/// [`punch_in`](Self::punch_in), [`punch_out`](Self::punch_out), and
/// [`toggle`](Self::toggle).
///
/// ## Lifecycle
///
/// ```text
///            punch_in()                      punch_out()
/// [Idle] ──→ auth? ─→ location ─→ submit ─→ [Active] ──→ location ─→ submit ─→ [Idle]
///              │          │          │                      │          │
///              ▼          ▼          ▼                      ▼          ▼
///            error      error      error                  error      error
///        (state unchanged on every error path)
/// ```
pub struct PunchClock<G, A> {
    geo: G,
    api: A,
    auth: AuthContext,
    state: watch::Sender<SessionState>,
    in_flight: AtomicBool,
}

impl<G, A> PunchClock<G, A>
where
    G: GeolocationProvider,
    A: AttendanceApi,
{
    /// Creates an idle clock.
    ///
    /// `auth` is read on every punch. Switch logins through
    /// [`switch_identity`](Self::switch_identity) so the change cannot
    /// interleave with a punch.
    pub fn new(geo: G, api: A, auth: AuthContext) -> Self {
        let (state, _rx) = watch::channel(SessionState::default());
        Self {
            geo,
            api,
            auth,
            state,
            in_flight: AtomicBool::new(false),
        }
    }

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// A receiver woken after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.borrow().status()
    }

    /// `true` while a punch is waiting on location or the network.
    /// Presentation uses this to disable the punch control.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Opens a work session.
    ///
    /// # Errors
    /// - [`PunchError::InFlight`] — another punch is running
    /// - [`PunchError::AlreadyPunchedIn`] — a session is already open
    /// - [`PunchError::Unauthenticated`] — nobody is logged in
    /// - geolocation and remote failures, see [`PunchError`]
    pub async fn punch_in(&self) -> Result<(), PunchError> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        self.punch_in_exclusive().await
    }

    /// Closes the open work session and moves it to history.
    ///
    /// With no open session this is a successful no-op: no location
    /// request, no network call.
    ///
    /// # Errors
    /// - [`PunchError::InFlight`] — another punch is running
    /// - [`PunchError::Unauthenticated`] — nobody is logged in
    /// - geolocation and remote failures, see [`PunchError`]
    pub async fn punch_out(&self) -> Result<(), PunchError> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        self.punch_out_exclusive().await
    }

    /// Punches out if a session is open, in otherwise. Returns the status
    /// after the call.
    pub async fn toggle(&self) -> Result<SessionStatus, PunchError> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        let active = self.state.borrow().is_active();
        if active {
            self.punch_out_exclusive().await?;
        } else {
            self.punch_in_exclusive().await?;
        }
        Ok(self.status())
    }

    /// Clears the current session and history.
    ///
    /// # Errors
    /// [`PunchError::InFlight`] if a punch is still running; its result
    /// would otherwise land in the freshly cleared state.
    pub fn reset(&self) -> Result<(), PunchError> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        self.clear();
        Ok(())
    }

    /// Makes `next` the logged-in identity (`None` logs out) in the same
    /// step as clearing the session, so no punch can run in between.
    /// The session is kept only when the same employee logs in again.
    /// Returns who was logged in before.
    ///
    /// # Errors
    /// [`PunchError::InFlight`] if a punch is still running. Neither the
    /// identity nor the session changes in that case.
    pub fn switch_identity(&self, next: Option<Identity>) -> Result<Option<Identity>, PunchError> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        let same_employee = match (self.auth.current(), &next) {
            (Some(current), Some(next)) => current.id == next.id,
            _ => false,
        };
        if !same_employee {
            self.clear();
        }
        Ok(self.auth.replace(next))
    }

    fn clear(&self) {
        self.state.send_replace(SessionState::default());
        tracing::info!("session state reset");
    }

    // -- Exclusive bodies: caller holds the in-flight guard ---------------

    async fn punch_in_exclusive(&self) -> Result<(), PunchError> {
        // Scope the borrow: a watch `Ref` must not live across an await.
        let active = self.state.borrow().is_active();
        if active {
            return Err(PunchError::AlreadyPunchedIn);
        }

        let identity = self.auth.current().ok_or(PunchError::Unauthenticated)?;
        self.record_punch(&identity, PunchDirection::ClockIn).await?;

        let entry = OpenEntry::start(identity.id.clone(), Utc::now());
        tracing::info!(
            employee_id = %identity.id,
            entry_id = %entry.id(),
            "punched in"
        );
        self.state.send_modify(|state| state.open(entry));
        Ok(())
    }

    async fn punch_out_exclusive(&self) -> Result<(), PunchError> {
        let owner = self
            .state
            .borrow()
            .current()
            .map(|open| open.employee_id().clone());
        let Some(owner) = owner else {
            tracing::debug!("punch-out with no open session, nothing to do");
            return Ok(());
        };

        // Only the employee who punched in may punch out.
        let identity = self
            .auth
            .current()
            .filter(|who| who.id == owner)
            .ok_or_else(|| {
                tracing::warn!(
                    session_owner = %owner,
                    "punch-out refused: not logged in as the employee who punched in"
                );
                PunchError::Unauthenticated
            })?;
        self.record_punch(&identity, PunchDirection::ClockOut).await?;

        let now = Utc::now();
        self.state.send_modify(|state| {
            if let Some(closed) = state.close_current(now) {
                tracing::info!(
                    employee_id = %identity.id,
                    entry_id = %closed.id(),
                    minutes = closed.duration().num_minutes(),
                    "punched out"
                );
            }
        });
        Ok(())
    }

    /// Location first, then the attendance API. Either failure aborts
    /// before anything is written locally.
    async fn record_punch(
        &self,
        identity: &Identity,
        direction: PunchDirection,
    ) -> Result<(), PunchError> {
        let coordinate = self.geo.current_coordinate().await.map_err(|e| {
            tracing::warn!(
                employee_id = %identity.id,
                %direction,
                error = %e,
                "punch aborted: no location"
            );
            PunchError::from(e)
        })?;
        tracing::debug!(%direction, %coordinate, "location acquired");

        let record = AttendanceRecord::new(identity.id.clone(), direction, coordinate);
        self.api.submit(&record).await.map_err(|e| {
            tracing::warn!(
                employee_id = %identity.id,
                %direction,
                error = %e,
                "punch aborted: attendance API"
            );
            PunchError::from(e)
        })
    }
}
