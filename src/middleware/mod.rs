//! HTTP middleware

pub mod auth;
pub mod logging;

pub use auth::{AuthenticatedUser, OptionalAuth, require_admin};
pub use logging::logging_middleware;
