//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::storage::StorageError;

/// Entity named in a not-found error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Contest,
    Problem,
    Submission,
    User,
    LeaderboardEntry,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contest => write!(f, "contest"),
            Self::Problem => write!(f, "problem"),
            Self::Submission => write!(f, "submission"),
            Self::User => write!(f, "user"),
            Self::LeaderboardEntry => write!(f, "leaderboard entry"),
        }
    }
}

/// Coarse error classification used for transport mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Forbidden,
    Unauthorized,
    Validation,
    Infrastructure,
}

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Resource errors
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },

    #[error("content key not found: {0}")]
    ContentNotFound(String),

    #[error("user {user_id} is not registered for contest {contest_id}")]
    NotRegistered { contest_id: Uuid, user_id: Uuid },

    // Conflicts
    #[error("user {user_id} is already registered for contest {contest_id}")]
    AlreadyRegistered { contest_id: Uuid, user_id: Uuid },

    #[error("content key already exists: {0}")]
    KeyAlreadyExists(String),

    #[error("contest {contest_id} still has problems")]
    ContestHasProblems { contest_id: Uuid },

    // Policy errors
    #[error("contest registration is closed")]
    RegistrationClosed { contest_id: Uuid },

    #[error("cohort {year} is not eligible for this contest")]
    InvalidYear { contest_id: Uuid, year: i32 },

    #[error("contest is not running")]
    ContestNotRunning { contest_id: Uuid },

    #[error("user not registered")]
    UserNotRegistered { contest_id: Uuid, user_id: Uuid },

    #[error("{entity} {id} belongs to another user")]
    NotOwner { entity: Entity, id: Uuid },

    #[error("admin access required")]
    AdminRequired,

    // Identity
    #[error("Unauthorized")]
    Unauthorized,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl AppError {
    /// Shorthand for a missing entity
    pub fn not_found(entity: Entity, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::ContentNotFound(_) | Self::NotRegistered { .. } => {
                ErrorKind::NotFound
            }
            Self::AlreadyRegistered { .. }
            | Self::KeyAlreadyExists(_)
            | Self::ContestHasProblems { .. } => ErrorKind::Conflict,
            Self::RegistrationClosed { .. }
            | Self::InvalidYear { .. }
            | Self::ContestNotRunning { .. }
            | Self::UserNotRegistered { .. }
            | Self::NotOwner { .. }
            | Self::AdminRequired => ErrorKind::Forbidden,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Database(_) | Self::Storage(_) | Self::Internal(_) => ErrorKind::Infrastructure,
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ContentNotFound(_) => "CONTENT_NOT_FOUND",
            Self::NotRegistered { .. } => "NOT_REGISTERED",
            Self::AlreadyRegistered { .. } => "ALREADY_REGISTERED",
            Self::KeyAlreadyExists(_) => "KEY_ALREADY_EXISTS",
            Self::ContestHasProblems { .. } => "CONTEST_HAS_PROBLEMS",
            Self::RegistrationClosed { .. } => "REGISTRATION_CLOSED",
            Self::InvalidYear { .. } => "INVALID_YEAR",
            Self::ContestNotRunning { .. } => "CONTEST_NOT_RUNNING",
            Self::UserNotRegistered { .. } => "USER_NOT_REGISTERED",
            Self::NotOwner { .. } => "NOT_OWNER",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log infrastructure errors but don't expose details to clients
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "A database error occurred".to_string()
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                "A storage error occurred".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::ContentNotFound(key),
            StorageError::AlreadyExists(key) => AppError::KeyAlreadyExists(key),
            other => AppError::Storage(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
