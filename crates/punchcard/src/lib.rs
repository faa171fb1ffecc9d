//! # Punchcard
//!
//! Punch-in/punch-out attendance for field employees.
//!
//! Each punch captures the device location, reports it to the attendance
//! API, and only then updates the local session. A failed punch leaves
//! the session exactly as it was.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use punchcard::prelude::*;
//!
//! # async fn run() -> Result<(), PunchcardError> {
//! let app = Punchcard::builder()
//!     .api_url("https://attendance.example.com")
//!     .build(
//!         StaticAuthenticator::development(),
//!         FixedLocation::from_degrees(12.9, 77.6)?,
//!     )?;
//!
//! app.login("test", "test").await?;
//! app.punch_in().await?;
//! println!("{}", app.status());
//! app.punch_out().await?;
//! # Ok(())
//! # }
//! ```

mod app;
mod error;
mod logging;

pub use app::{Punchcard, PunchcardBuilder};
pub use error::PunchcardError;
pub use logging::init_tracing;

pub use punchcard_auth as auth;
pub use punchcard_clock as clock;
pub use punchcard_geo as geo;
pub use punchcard_protocol as protocol;
pub use punchcard_remote as remote;

/// Everything an application embedding Punchcard usually needs.
pub mod prelude {
    pub use crate::{Punchcard, PunchcardBuilder, PunchcardError, init_tracing};

    pub use punchcard_auth::{AuthContext, AuthError, Authenticator, StaticAuthenticator};
    pub use punchcard_clock::{
        ClosedEntry, EntryId, OpenEntry, PunchClock, PunchError, SessionState, SessionStatus,
        TimeEntry,
    };
    pub use punchcard_geo::{FixedLocation, GeoError, GeolocationProvider, NoGeolocation};
    pub use punchcard_protocol::{
        AttendanceRecord, EmployeeId, GeoCoordinate, Identity, ProtocolError, PunchDirection,
    };
    pub use punchcard_remote::{
        AttendanceApi, HttpAttendanceClient, RemoteConfig, RemoteError,
    };
}
