//! Submission response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Submission, SubmissionStatus};

/// Returned when a submission is accepted for grading
#[derive(Debug, Serialize)]
pub struct CreateSubmissionResponse {
    pub id: Uuid,
    pub status: SubmissionStatus,
}

/// Submissions list response
#[derive(Debug, Serialize)]
pub struct SubmissionsListResponse {
    pub submissions: Vec<Submission>,
    pub page: u32,
}
