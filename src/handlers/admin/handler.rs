//! Admin handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    models::{Contest, Problem},
    state::AppState,
};

use super::{
    request::{ContestRequest, CreateProblemRequest, UpdateLeaderboardRequest, UpdateProblemRequest},
    response::{AdminProbeResponse, RegistrationsListResponse},
};

/// Confirm the caller passed the admin gate
pub async fn admin_probe(auth_user: AuthenticatedUser) -> Json<AdminProbeResponse> {
    Json(AdminProbeResponse {
        user_id: auth_user.id,
        is_admin: true,
    })
}

/// Create a contest
pub async fn create_contest(
    State(state): State<AppState>,
    Json(payload): Json<ContestRequest>,
) -> AppResult<(StatusCode, Json<Contest>)> {
    payload.validate()?;

    let contest = state.contests().create_contest(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(contest)))
}

/// Replace a contest
pub async fn update_contest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContestRequest>,
) -> AppResult<Json<Contest>> {
    payload.validate()?;

    let contest = state.contests().update_contest(id, payload.into()).await?;
    Ok(Json(contest))
}

/// Delete a contest
pub async fn delete_contest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.contests().delete_contest(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List contest registrants
pub async fn list_registrations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RegistrationsListResponse>> {
    let registrations = state.registrations().list_registrations(id).await?;

    Ok(Json(RegistrationsListResponse {
        contest_id: id,
        registrations,
    }))
}

/// Add a problem to a contest
pub async fn create_problem(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateProblemRequest>,
) -> AppResult<(StatusCode, Json<Problem>)> {
    payload.validate()?;

    let problem = state.problems().create_problem(id, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(problem)))
}

/// Update a problem
pub async fn update_problem(
    State(state): State<AppState>,
    Path((id, problem_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateProblemRequest>,
) -> AppResult<Json<Problem>> {
    payload.validate()?;

    let problem = state
        .problems()
        .update_problem(id, problem_id, payload.into())
        .await?;
    Ok(Json(problem))
}

/// Remove a problem
pub async fn delete_problem(
    State(state): State<AppState>,
    Path((id, problem_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state.problems().delete_problem(id, problem_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Hide or disqualify a leaderboard entry
pub async fn update_leaderboard_entry(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateLeaderboardRequest>,
) -> AppResult<StatusCode> {
    state
        .leaderboard()
        .update_entry(id, user_id, payload.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
