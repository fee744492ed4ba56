//! Admin request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_CONTEST_NAME_LENGTH, MAX_PROBLEM_NAME_LENGTH},
    models::{ContestInput, LeaderboardPatch, NewProblem, ProblemType, ProblemUpdate},
    utils::validation::{validate_choices, validate_cohorts},
};

/// Create or replace a contest
#[derive(Debug, Deserialize, Validate)]
pub struct ContestRequest {
    #[validate(length(min = 1, max = MAX_CONTEST_NAME_LENGTH))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub registration_start_time: DateTime<Utc>,
    pub registration_end_time: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    /// Cohorts allowed to register
    #[validate(custom(function = "validate_cohorts"))]
    pub eligible_to: Vec<i32>,
}

impl From<ContestRequest> for ContestInput {
    fn from(request: ContestRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            registration_start_time: request.registration_start_time,
            registration_end_time: request.registration_end_time,
            start_time: request.start_time,
            end_time: request.end_time,
            eligible_to: request.eligible_to,
        }
    }
}

/// Create problem request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProblemRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_NAME_LENGTH))]
    pub name: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(range(min = 1))]
    pub score: i32,

    #[serde(rename = "type")]
    pub problem_type: ProblemType,

    /// Correct option indices (MCQ)
    #[serde(default)]
    #[validate(custom(function = "validate_choices"))]
    pub answer: Vec<i32>,
}

impl From<CreateProblemRequest> for NewProblem {
    fn from(request: CreateProblemRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            score: request.score,
            problem_type: request.problem_type,
            answer: request.answer,
        }
    }
}

/// Partial problem update
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProblemRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_NAME_LENGTH))]
    pub name: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(range(min = 1))]
    pub score: Option<i32>,

    #[serde(rename = "type")]
    pub problem_type: Option<ProblemType>,

    #[validate(custom(function = "validate_choices"))]
    pub answer: Option<Vec<i32>>,
}

impl From<UpdateProblemRequest> for ProblemUpdate {
    fn from(request: UpdateProblemRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            score: request.score,
            problem_type: request.problem_type,
            answer: request.answer,
        }
    }
}

/// Leaderboard flags to change
#[derive(Debug, Deserialize)]
pub struct UpdateLeaderboardRequest {
    pub hidden: Option<bool>,
    pub disqualified: Option<bool>,
}

impl From<UpdateLeaderboardRequest> for LeaderboardPatch {
    fn from(request: UpdateLeaderboardRequest) -> Self {
        Self {
            hidden: request.hidden,
            disqualified: request.disqualified,
        }
    }
}
