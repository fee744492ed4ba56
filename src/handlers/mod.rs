//! HTTP Request Handlers
//!
//! Thin adapters: parse, validate the request shape, call one service
//! operation and let `AppError` become the response.

pub mod admin;
pub mod contests;
pub mod health;
pub mod submissions;

use axum::{Router, middleware};

use crate::{middleware::auth::require_admin, state::AppState};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/contests", contests::routes())
        .nest("/submissions", submissions::routes())
        .nest(
            "/admin",
            admin::routes().route_layer(middleware::from_fn_with_state(state, require_admin)),
        )
}
