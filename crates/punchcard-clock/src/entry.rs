//! Time entries: one work session, before and after it is closed.
//!
//! An entry is one of two types, depending on whether it has been punched
//! out:
//!
//! - [`OpenEntry`] has no punch-out field at all. The current session is
//!   always one of these.
//! - [`ClosedEntry`] always has one, and it is never earlier than the
//!   punch-in. History only ever holds these.
//!
//! Neither type can be built or mutated from outside this crate; the only
//! way to get a `ClosedEntry` is to close an `OpenEntry`. Both remember the
//! employee who punched in, and only that employee can punch out.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use punchcard_protocol::EmployeeId;
use rand::Rng;
use serde::Serialize;

// ---------------------------------------------------------------------------
// EntryId
// ---------------------------------------------------------------------------

/// Opaque identifier of a time entry: 32 lowercase hex characters
/// (128 random bits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Generates a fresh random id.
    pub(crate) fn generate() -> Self {
        let mut rng = rand::rng();
        let bytes: [u8; 16] = rng.random();
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// OpenEntry
// ---------------------------------------------------------------------------

/// A session that has been punched in but not yet punched out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenEntry {
    id: EntryId,
    employee_id: EmployeeId,
    punched_in_at: DateTime<Utc>,
}

impl OpenEntry {
    /// Starts a new session for `employee_id` at `at` with a fresh id.
    pub(crate) fn start(employee_id: EmployeeId, at: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::generate(),
            employee_id,
            punched_in_at: at,
        }
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// Who punched in.
    pub fn employee_id(&self) -> &EmployeeId {
        &self.employee_id
    }

    pub fn punched_in_at(&self) -> DateTime<Utc> {
        self.punched_in_at
    }

    /// Time worked so far, as of `now`. Never negative.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.punched_in_at).max(Duration::zero())
    }

    /// Closes the session at `at`.
    ///
    /// If the wall clock moved backwards since punch-in, the punch-out is
    /// pinned to the punch-in time so the entry never has a negative
    /// duration.
    pub(crate) fn close(self, at: DateTime<Utc>) -> ClosedEntry {
        ClosedEntry {
            punched_out_at: at.max(self.punched_in_at),
            id: self.id,
            employee_id: self.employee_id,
            punched_in_at: self.punched_in_at,
        }
    }
}

// ---------------------------------------------------------------------------
// ClosedEntry
// ---------------------------------------------------------------------------

/// A finished session. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosedEntry {
    id: EntryId,
    employee_id: EmployeeId,
    punched_in_at: DateTime<Utc>,
    punched_out_at: DateTime<Utc>,
}

impl ClosedEntry {
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn employee_id(&self) -> &EmployeeId {
        &self.employee_id
    }

    pub fn punched_in_at(&self) -> DateTime<Utc> {
        self.punched_in_at
    }

    pub fn punched_out_at(&self) -> DateTime<Utc> {
        self.punched_out_at
    }

    /// Length of the session.
    pub fn duration(&self) -> Duration {
        self.punched_out_at - self.punched_in_at
    }
}

// ---------------------------------------------------------------------------
// TimeEntry
// ---------------------------------------------------------------------------

/// Either kind of entry, for code that renders both in one list
/// (a history screen showing the running session on top).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TimeEntry {
    Open(OpenEntry),
    Closed(ClosedEntry),
}

impl TimeEntry {
    pub fn id(&self) -> &EntryId {
        match self {
            Self::Open(e) => e.id(),
            Self::Closed(e) => e.id(),
        }
    }

    pub fn employee_id(&self) -> &EmployeeId {
        match self {
            Self::Open(e) => e.employee_id(),
            Self::Closed(e) => e.employee_id(),
        }
    }

    pub fn punched_in_at(&self) -> DateTime<Utc> {
        match self {
            Self::Open(e) => e.punched_in_at(),
            Self::Closed(e) => e.punched_in_at(),
        }
    }

    /// `None` while the session is still running.
    pub fn punched_out_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Open(_) => None,
            Self::Closed(e) => Some(e.punched_out_at()),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// Elapsed time for an open entry, fixed duration for a closed one.
    pub fn duration(&self, now: DateTime<Utc>) -> Duration {
        match self {
            Self::Open(e) => e.elapsed(now),
            Self::Closed(e) => e.duration(),
        }
    }
}

impl From<OpenEntry> for TimeEntry {
    fn from(entry: OpenEntry) -> Self {
        Self::Open(entry)
    }
}

impl From<ClosedEntry> for TimeEntry {
    fn from(entry: ClosedEntry) -> Self {
        Self::Closed(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, h, m, 0).unwrap()
    }

    fn start(at: DateTime<Utc>) -> OpenEntry {
        OpenEntry::start(EmployeeId::new("EMP001"), at)
    }

    #[test]
    fn test_entry_id_generate_is_32_hex_chars() {
        let id = EntryId::generate();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_entry_id_generate_is_unique() {
        assert_ne!(EntryId::generate(), EntryId::generate());
    }

    #[test]
    fn test_open_entry_close_keeps_id_and_times() {
        let open = start(at(9, 0));
        let id = open.id().clone();

        let closed = open.close(at(17, 30));

        assert_eq!(closed.id(), &id);
        assert_eq!(closed.employee_id().as_str(), "EMP001");
        assert_eq!(closed.punched_in_at(), at(9, 0));
        assert_eq!(closed.punched_out_at(), at(17, 30));
        assert_eq!(closed.duration(), Duration::minutes(8 * 60 + 30));
    }

    #[test]
    fn test_open_entry_close_before_punch_in_is_clamped() {
        // Wall clock stepped back (NTP correction) between the punches.
        let closed = start(at(9, 0)).close(at(8, 55));

        assert_eq!(closed.punched_out_at(), at(9, 0));
        assert_eq!(closed.duration(), Duration::zero());
    }

    #[test]
    fn test_open_entry_elapsed_never_negative() {
        let open = start(at(9, 0));
        assert_eq!(open.elapsed(at(10, 15)), Duration::minutes(75));
        assert_eq!(open.elapsed(at(8, 0)), Duration::zero());
    }

    #[test]
    fn test_time_entry_accessors() {
        let open: TimeEntry = start(at(9, 0)).into();
        assert!(open.is_open());
        assert_eq!(open.punched_out_at(), None);
        assert_eq!(open.duration(at(9, 45)), Duration::minutes(45));

        let closed: TimeEntry = start(at(9, 0)).close(at(12, 0)).into();
        assert!(!closed.is_open());
        assert_eq!(closed.punched_out_at(), Some(at(12, 0)));
        assert_eq!(closed.duration(at(23, 0)), Duration::hours(3));
    }
}
