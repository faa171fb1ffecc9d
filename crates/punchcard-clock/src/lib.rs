//! The punch clock: Punchcard's session state machine.
//!
//! This crate owns the only state in the system with real invariants:
//! whether a work session is open, and the list of sessions already
//! closed.
//!
//! # Key types
//!
//! - [`PunchClock`] — the state machine; `punch_in()` / `punch_out()`
//! - [`SessionState`] — an immutable snapshot of current session + history
//! - [`OpenEntry`] / [`ClosedEntry`] — a session before and after punch-out
//! - [`TimeEntry`] — either of the two, for rendering mixed lists
//! - [`PunchError`] — every way a punch can fail
//!
//! # State machine
//!
//! ```text
//!          punch_in() ok
//!   Idle ─────────────────→ Active
//!    ↑                        │
//!    └────── punch_out() ok ──┘
//! ```
//!
//! Any failure leaves the machine in the state it started in.

mod clock;
mod entry;
mod error;
mod state;

pub use clock::PunchClock;
pub use entry::{ClosedEntry, EntryId, OpenEntry, TimeEntry};
pub use error::PunchError;
pub use state::{SessionState, SessionStatus};
