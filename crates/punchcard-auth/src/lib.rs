//! Authentication for Punchcard.
//!
//! This crate answers one question for the rest of the system: *who is
//! punching?*
//!
//! 1. **Credential check** — turning a username/password into an
//!    [`Identity`] ([`Authenticator`] trait, [`StaticAuthenticator`])
//! 2. **Identity tracking** — remembering who is logged in and letting
//!    other layers read and observe it ([`AuthContext`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Clock Layer (above)  ← reads the identity to stamp every punch
//!     ↕
//! Auth Layer (this crate)  ← login / logout / current identity
//!     ↕
//! Protocol Layer (below)  ← provides Identity, EmployeeId
//! ```

#![allow(async_fn_in_trait)]

mod auth;
mod context;
mod error;

pub use auth::{Authenticator, StaticAuthenticator};
pub use context::AuthContext;
pub use error::AuthError;
pub use punchcard_protocol::{EmployeeId, Identity};
