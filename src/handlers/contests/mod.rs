//! Participant-facing contest handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Contest routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_contests))
        .route("/{id}", get(handler::get_contest))
        // Registration
        .route("/{id}/register", post(handler::register_for_contest))
        .route("/{id}/unregister", post(handler::unregister_from_contest))
        // Problems, behind the visibility gate
        .route("/{id}/problems", get(handler::list_contest_problems))
        .route("/{id}/problems/{problem_id}", get(handler::get_contest_problem))
}
