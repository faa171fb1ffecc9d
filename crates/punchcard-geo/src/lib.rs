//! Geolocation abstraction for Punchcard.
//!
//! Every punch is tagged with the device's position. Where that position
//! comes from (a phone's GPS, a browser API, a fixed office location on a
//! kiosk) is not the session layer's business, so it is hidden behind the
//! [`GeolocationProvider`] trait.
//!
//! # Bundled providers
//!
//! - [`FixedLocation`] — always reports the same coordinate (kiosks,
//!   desktop builds, tests)
//! - [`NoGeolocation`] — a platform without any location capability

#![allow(async_fn_in_trait)]

mod error;
mod fixed;

pub use error::GeoError;
pub use fixed::{FixedLocation, NoGeolocation};

use punchcard_protocol::GeoCoordinate;

/// A one-shot source of the device's current position.
///
/// # Contract
///
/// - Each call requests exactly **one** fresh reading. Implementations must
///   not hand back a cached reading from an earlier call.
/// - Any timeout belongs to the provider; callers do not wrap the call in
///   their own timer.
/// - No retries. A failure is reported immediately so the punch can be
///   aborted before anything is sent over the network.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` lets the provider live inside a long-lived,
/// shared `PunchClock` that Tokio may poll from any worker thread.
pub trait GeolocationProvider: Send + Sync + 'static {
    /// Requests the current coordinate.
    ///
    /// # Returns
    /// - `Ok(GeoCoordinate)` — a validated reading
    /// - `Err(GeoError::PermissionDenied)` — the user said no
    /// - `Err(GeoError::Unsupported | GeoError::Unavailable(_))` — no
    ///   reading could be produced
    fn current_coordinate(
        &self,
    ) -> impl std::future::Future<Output = Result<GeoCoordinate, GeoError>> + Send;
}
