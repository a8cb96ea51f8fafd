//! HTTP middleware and extractors for the dashboard.
//!
//! # Middleware Order (outermost first, see `lib.rs`)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! Identity and store ownership are extractors rather than layers, so each
//! handler states what it needs: [`auth::RequireOwner`],
//! [`auth::OptionalOwner`] or [`store::OwnedStore`].

pub mod auth;
pub mod session;
pub mod store;

pub use auth::{OptionalOwner, RequireOwner};
pub use session::{SESSION_COOKIE_NAME, create_session_layer, flash, take_notice};
pub use store::OwnedStore;
