//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ProblemType;

/// Submission status.
///
/// A submission is created `Pending`; the external grader moves it to exactly
/// one of the final states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    CompilationError,
}

impl SubmissionStatus {
    /// Get status as stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::WrongAnswer => "wrong_answer",
            Self::TimeLimitExceeded => "time_limit_exceeded",
            Self::MemoryLimitExceeded => "memory_limit_exceeded",
            Self::RuntimeError => "runtime_error",
            Self::CompilationError => "compilation_error",
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "wrong_answer" => Ok(Self::WrongAnswer),
            "time_limit_exceeded" => Ok(Self::TimeLimitExceeded),
            "memory_limit_exceeded" => Ok(Self::MemoryLimitExceeded),
            "runtime_error" => Ok(Self::RuntimeError),
            "compilation_error" => Ok(Self::CompilationError),
            other => Err(format!("unknown submission status: {other}")),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Submission metadata as held by the relational store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contest_id: Uuid,
    pub problem_id: Uuid,
    #[serde(rename = "type")]
    pub submission_type: ProblemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Selected option indices (MCQ only)
    pub choices: Vec<i32>,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
    pub runtime: Option<i64>,
    pub memory: Option<i64>,
}

/// Caller input for a new submission
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewSubmission {
    pub contest_id: Uuid,
    pub problem_id: Uuid,
    #[serde(rename = "type")]
    pub submission_type: ProblemType,
    pub language: Option<String>,
    /// Raw code text (code submissions only)
    pub code: Option<String>,
    #[serde(default)]
    pub choices: Vec<i32>,
}

/// Cheap polling projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionStatusView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: SubmissionStatus,
}

/// Per-test-case grading outcome, written by the grader
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCaseResult {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub test_case_id: Uuid,
    pub status: String,
    pub runtime: Option<i64>,
    pub memory: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Full submission view: metadata, code and test case results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionDetails {
    #[serde(flatten)]
    pub submission: Submission,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub test_case_results: Vec<TestCaseResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_storage_form() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::WrongAnswer,
            SubmissionStatus::MemoryLimitExceeded,
        ] {
            assert_eq!(status.as_str().parse::<SubmissionStatus>().unwrap(), status);
        }
        assert!("Wrong Answer".parse::<SubmissionStatus>().is_err());
    }
}
