//! Caller identity and the admin gate
//!
//! Identity is resolved upstream; the gateway forwards the caller's user id in
//! the `X-User-Id` header.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::{constants::USER_ID_HEADER, error::AppError, state::AppState};

/// Identified caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
}

fn user_from_parts(parts: &Parts) -> Option<AuthenticatedUser> {
    if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
        return Some(*user);
    }

    parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .map(|id| AuthenticatedUser { id })
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        user_from_parts(parts).ok_or_else(|| {
            debug!(path = %parts.uri.path(), "Missing or malformed caller identity");
            AppError::Unauthorized
        })
    }
}

/// Optional caller identity (never fails)
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(user_from_parts(parts)))
    }
}

/// Admit only callers listed in the `admin` table
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = request.into_parts();
    let user = AuthenticatedUser::from_request_parts(&mut parts, &state).await?;

    if !state.admins().is_admin(user.id).await? {
        debug!(user_id = %user.id, path = %parts.uri.path(), "Admin access denied");
        return Err(AppError::AdminRequired);
    }

    parts.extensions.insert(user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}
