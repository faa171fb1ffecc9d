//! Wire types for Punchcard.
//!
//! This crate defines the "language" the client speaks with the attendance
//! API and the values shared between the layers above it:
//!
//! - **Identity** ([`Identity`], [`EmployeeId`]) — who is punching.
//! - **Location** ([`GeoCoordinate`]) — where the punch happened.
//! - **Records** ([`AttendanceRecord`], [`PunchDirection`]) — the JSON body
//!   POSTed for every punch.
//! - **Errors** ([`ErrorBody`], [`ProtocolError`]) — what the server says
//!   when it rejects a punch, and what can go wrong while reading it.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about HTTP or session state. It only
//! knows what the messages look like.
//!
//! ```text
//! Clock (session state) → Protocol (AttendanceRecord) → Remote (HTTP)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod error;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

// Users write `use punchcard_protocol::AttendanceRecord` instead of
// `use punchcard_protocol::types::AttendanceRecord`.

pub use error::ProtocolError;
pub use types::{
    AttendanceRecord, EmployeeId, ErrorBody, GeoCoordinate, Identity,
    PunchDirection,
};
