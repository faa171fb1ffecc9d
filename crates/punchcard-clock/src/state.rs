//! The session snapshot observed by presentation code.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::{ClosedEntry, OpenEntry, TimeEntry};

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// Whether a work session is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    /// No open session. The next punch is a punch-in.
    Idle,
    /// One open session. The next punch is a punch-out.
    Active,
}

impl SessionStatus {
    /// Human-readable label for a status line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Not Clocked In",
            Self::Active => "Currently Working",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The current session (if any) and every session closed since login.
///
/// Values of this type are snapshots: the [`PunchClock`](crate::PunchClock)
/// replaces its snapshot in one step after every successful punch, and
/// observers only ever see a whole snapshot, never a half-applied one.
///
/// Invariants (enforced by the types and by the two mutators below):
/// - at most one open entry
/// - history is newest-first by punch-out time
/// - an entry is either current or in history, never both
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    current: Option<OpenEntry>,
    history: Vec<ClosedEntry>,
}

impl SessionState {
    /// The open session, if one is running.
    pub fn current(&self) -> Option<&OpenEntry> {
        self.current.as_ref()
    }

    /// Closed sessions, most recently closed first.
    pub fn history(&self) -> &[ClosedEntry] {
        &self.history
    }

    pub fn status(&self) -> SessionStatus {
        if self.current.is_some() {
            SessionStatus::Active
        } else {
            SessionStatus::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// How long the open session has been running, as of `now`.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.current.as_ref().map(|e| e.elapsed(now))
    }

    /// Every entry for a history list: the open one (if any) first, then
    /// the closed ones newest-first.
    pub fn entries(&self) -> Vec<TimeEntry> {
        self.current
            .iter()
            .cloned()
            .map(TimeEntry::from)
            .chain(self.history.iter().cloned().map(TimeEntry::from))
            .collect()
    }

    /// Total time across closed sessions plus the running one.
    pub fn total_worked(&self, now: DateTime<Utc>) -> Duration {
        let closed = self
            .history
            .iter()
            .fold(Duration::zero(), |acc, e| acc + e.duration());
        closed + self.elapsed(now).unwrap_or_else(Duration::zero)
    }

    /// Installs `entry` as the open session.
    ///
    /// Callers check `is_active()` first; an open session is never
    /// silently replaced.
    pub(crate) fn open(&mut self, entry: OpenEntry) {
        debug_assert!(self.current.is_none(), "session already open");
        self.current = Some(entry);
    }

    /// Closes the open session at `at` and moves it to the head of
    /// history. Returns the closed entry, or `None` if nothing was open.
    ///
    /// `at` is clamped so the new head is never older than the previous
    /// head, keeping history ordered even if the wall clock stepped back.
    pub(crate) fn close_current(&mut self, at: DateTime<Utc>) -> Option<&ClosedEntry> {
        let open = self.current.take()?;
        let floor = self.history.first().map(ClosedEntry::punched_out_at);
        let at = floor.map_or(at, |f| at.max(f));
        self.history.insert(0, open.close(at));
        self.history.first()
    }
}
