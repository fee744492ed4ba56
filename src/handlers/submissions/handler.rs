//! Submission handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult, Entity},
    middleware::auth::AuthenticatedUser,
    models::{SubmissionDetails, SubmissionStatusView},
    state::AppState,
};

use super::{
    request::{CreateSubmissionRequest, ListSubmissionsQuery},
    response::{CreateSubmissionResponse, SubmissionsListResponse},
};

/// Submit an answer or code for grading
pub async fn create_submission(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateSubmissionRequest>,
) -> AppResult<(StatusCode, Json<CreateSubmissionResponse>)> {
    payload.validate()?;

    state
        .contests()
        .check_visibility(payload.contest_id, auth_user.id)
        .await?;

    let submission = state
        .submissions()
        .create_submission(auth_user.id, payload.into())
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(CreateSubmissionResponse {
            id: submission.id,
            status: submission.status,
        }),
    ))
}

/// List the caller's submissions to a problem
pub async fn list_submissions(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListSubmissionsQuery>,
) -> AppResult<Json<SubmissionsListResponse>> {
    let page = query.page.unwrap_or(0);
    let submissions = state
        .submissions()
        .list_by_user_and_problem(auth_user.id, query.problem_id, page)
        .await?;

    Ok(Json(SubmissionsListResponse { submissions, page }))
}

/// Poll a submission's status
pub async fn get_submission_status(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionStatusView>> {
    let status = state.submissions().get_status(id).await?;
    ensure_owner(auth_user, status.user_id, id)?;
    Ok(Json(status))
}

/// Get a submission with its code and test case results
pub async fn get_submission(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionDetails>> {
    let details = state.submissions().get_details(id).await?;
    ensure_owner(auth_user, details.submission.user_id, id)?;
    Ok(Json(details))
}

fn ensure_owner(caller: AuthenticatedUser, owner: Uuid, submission_id: Uuid) -> AppResult<()> {
    if caller.id != owner {
        return Err(AppError::NotOwner {
            entity: Entity::Submission,
            id: submission_id,
        });
    }
    Ok(())
}
