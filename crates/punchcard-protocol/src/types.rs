//! Core protocol types for Punchcard's wire format.
//!
//! Everything in this module either travels "on the wire" (serialized to
//! JSON and POSTed to the attendance API) or is a plain value shared by the
//! layers above: the identity of the person punching and the coordinate
//! their device reported.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The attendance system's identifier for an employee (e.g. `"EMP001"`).
///
/// A newtype wrapper around `String`: you can't accidentally pass a display
/// name where an employee id is expected, even though both are strings.
///
/// `#[serde(transparent)]` serializes this as the bare string, so
/// `EmployeeId("EMP001")` becomes `"EMP001"` in JSON, not
/// `{ "0": "EMP001" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who is currently logged in.
///
/// Owned by the authentication context; the session state machine only
/// ever reads a clone of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The id sent to the attendance API as `employee_id`.
    pub id: EmployeeId,
    /// Human-readable name, used for greetings ("Welcome, Ada!").
    pub name: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: EmployeeId::new(id),
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// GeoCoordinate
// ---------------------------------------------------------------------------

/// A latitude/longitude pair in decimal degrees (WGS 84).
///
/// The fields are private so the only way to get a `GeoCoordinate` is
/// through [`GeoCoordinate::new`], which rejects NaN, infinities, and
/// out-of-range values. Everything downstream can trust the numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Validates and creates a coordinate.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidValue`] if either value is not
    /// finite, latitude is outside `[-90, 90]`, or longitude is outside
    /// `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ProtocolError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ProtocolError::InvalidValue(format!(
                "latitude out of range: {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ProtocolError::InvalidValue(format!(
                "longitude out of range: {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

// ---------------------------------------------------------------------------
// PunchDirection
// ---------------------------------------------------------------------------

/// Whether a punch opens or closes a work session.
///
/// `#[serde(rename_all = "snake_case")]` makes the JSON representation
/// `"clock_in"` / `"clock_out"`, which is what the attendance API expects in
/// the record's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchDirection {
    /// Opens a session (punch-in).
    ClockIn,
    /// Closes a session (punch-out).
    ClockOut,
}

impl PunchDirection {
    /// Returns `true` for [`ClockIn`](Self::ClockIn).
    pub fn is_clock_in(self) -> bool {
        matches!(self, Self::ClockIn)
    }

    /// The message shown when the server rejects a punch without saying why.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::ClockIn => "Failed to punch in",
            Self::ClockOut => "Failed to punch out",
        }
    }
}

impl fmt::Display for PunchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClockIn => f.write_str("clock_in"),
            Self::ClockOut => f.write_str("clock_out"),
        }
    }
}

// ---------------------------------------------------------------------------
// AttendanceRecord
// ---------------------------------------------------------------------------

/// The JSON body POSTed to the attendance API for every punch.
///
/// ```json
/// {
///   "employee_id": "EMP001",
///   "type": "clock_in",
///   "clock_in": true,
///   "latitude": 12.9,
///   "longitude": 77.6
/// }
/// ```
///
/// `type` and `clock_in` carry the same information twice; the API wants
/// both. Build records with [`AttendanceRecord::new`] so they never disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRecord {
    pub employee_id: EmployeeId,

    /// `type` is a Rust keyword, so the field is renamed on the wire.
    #[serde(rename = "type")]
    pub direction: PunchDirection,

    pub clock_in: bool,
    pub latitude: f64,
    pub longitude: f64,
}

impl AttendanceRecord {
    pub fn new(
        employee_id: EmployeeId,
        direction: PunchDirection,
        coordinate: GeoCoordinate,
    ) -> Self {
        Self {
            employee_id,
            direction,
            clock_in: direction.is_clock_in(),
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
        }
    }
}

// ---------------------------------------------------------------------------
// ErrorBody
// ---------------------------------------------------------------------------

/// The body the attendance API may send with a non-success status.
///
/// Every field is optional: servers in the wild send `{}`, `{"error": ..}`,
/// or nothing at all, and all of those must decode without failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Decodes an error body from raw response bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are not a JSON object.
    pub fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }

    /// The server's message exactly as sent, unless it is blank.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
    }
}

// =========================================================================
// Tests
// =========================================================================
