//! Admin handlers
//!
//! Every route here sits behind the `require_admin` gate.

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Admin routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::admin_probe))
        // Contest management
        .route("/contests", post(handler::create_contest))
        .route(
            "/contests/{id}",
            put(handler::update_contest).delete(handler::delete_contest),
        )
        .route("/contests/{id}/registrations", get(handler::list_registrations))
        // Problem management
        .route("/contests/{id}/problems", post(handler::create_problem))
        .route(
            "/contests/{id}/problems/{problem_id}",
            put(handler::update_problem).delete(handler::delete_problem),
        )
        // Leaderboard moderation
        .route(
            "/contests/{id}/leaderboard/{user_id}",
            put(handler::update_leaderboard_entry),
        )
}
