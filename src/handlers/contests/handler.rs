//! Contest handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::{AuthenticatedUser, OptionalAuth},
    models::{ContestDetail, ProblemStatement},
    state::AppState,
};

use super::{
    request::ListContestsQuery,
    response::{ContestProblemsResponse, ContestsListResponse, RegistrationResponse},
};

/// List contests, latest first
pub async fn list_contests(
    State(state): State<AppState>,
    Query(query): Query<ListContestsQuery>,
) -> AppResult<Json<ContestsListResponse>> {
    let page = query.page.unwrap_or(0);
    let contests = state.contests().list_contests(page).await?;

    Ok(Json(ContestsListResponse { contests, page }))
}

/// Get a contest; identified callers also learn whether they are registered
pub async fn get_contest(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ContestDetail>> {
    let detail = state
        .contests()
        .get_contest(id, viewer.map(|user| user.id))
        .await?;
    Ok(Json(detail))
}

/// Register for a contest
pub async fn register_for_contest(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<RegistrationResponse>)> {
    state.registrations().register(id, auth_user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            contest_id: id,
            user_id: auth_user.id,
            registered: true,
        }),
    ))
}

/// Withdraw from a contest
pub async fn unregister_from_contest(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RegistrationResponse>> {
    state.registrations().unregister(id, auth_user.id).await?;

    Ok(Json(RegistrationResponse {
        contest_id: id,
        user_id: auth_user.id,
        registered: false,
    }))
}

/// List the problems of a contest
pub async fn list_contest_problems(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ContestProblemsResponse>> {
    state.contests().check_visibility(id, auth_user.id).await?;
    let problems = state.problems().list_problems(id).await?;

    Ok(Json(ContestProblemsResponse {
        contest_id: id,
        problems,
    }))
}

/// Get a problem statement
pub async fn get_contest_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((id, problem_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ProblemStatement>> {
    state.contests().check_visibility(id, auth_user.id).await?;
    let statement = state.problems().get_problem(id, problem_id).await?;
    Ok(Json(statement))
}
