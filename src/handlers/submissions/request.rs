//! Submission request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::MAX_LANGUAGE_LENGTH,
    models::{NewSubmission, ProblemType},
    utils::validation::{validate_choices, validate_language},
};

/// Create submission request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubmissionRequest {
    pub contest_id: Uuid,
    pub problem_id: Uuid,

    /// `mcq` or `code`
    #[serde(rename = "type")]
    pub submission_type: ProblemType,

    #[validate(length(min = 1, max = MAX_LANGUAGE_LENGTH), custom(function = "validate_language"))]
    pub language: Option<String>,

    /// Source code (code submissions only)
    #[validate(length(min = 1))]
    pub code: Option<String>,

    /// Selected options (MCQ only)
    #[serde(default)]
    #[validate(custom(function = "validate_choices"))]
    pub choices: Vec<i32>,
}

impl From<CreateSubmissionRequest> for NewSubmission {
    fn from(request: CreateSubmissionRequest) -> Self {
        Self {
            contest_id: request.contest_id,
            problem_id: request.problem_id,
            submission_type: request.submission_type,
            language: request.language,
            code: request.code,
            choices: request.choices,
        }
    }
}

/// Submission listing query
#[derive(Debug, Deserialize)]
pub struct ListSubmissionsQuery {
    pub problem_id: Uuid,
    /// 0-based page
    pub page: Option<u32>,
}
