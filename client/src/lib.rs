//! Client core for the admin console.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call goes through [`net::http::HttpClient`], which attaches
//! the session token, picks up rotated tokens from response headers and maps
//! failures onto user-facing notifications. [`state::session`] owns the token
//! and profile, [`router`] gates navigation on the session, and [`util`]
//! isolates durable storage and notification sinks behind traits.

pub mod config;
pub mod net;
pub mod router;
pub mod state;
pub mod util;

#[cfg(test)]
#[path = "test_helpers_test.rs"]
pub(crate) mod test_helpers;

pub use config::ClientConfig;
pub use net::error::ApiError;
pub use net::http::{HttpClient, RequestSpec};
pub use router::{Location, Navigator, Router};
pub use state::session::{Session, SessionStore};
