//! Contest response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::models::{ContestDetail, ProblemOverview};

/// Contest list response
#[derive(Debug, Serialize)]
pub struct ContestsListResponse {
    pub contests: Vec<ContestDetail>,
    pub page: u32,
}

/// Registration outcome
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub contest_id: Uuid,
    pub user_id: Uuid,
    pub registered: bool,
}

/// Problems of a contest
#[derive(Debug, Serialize)]
pub struct ContestProblemsResponse {
    pub contest_id: Uuid,
    pub problems: Vec<ProblemOverview>,
}
