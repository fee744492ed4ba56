//! Problem model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Problem (and submission) type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    Mcq,
    Code,
}

impl ProblemType {
    /// Get problem type as stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mcq => "mcq",
            Self::Code => "code",
        }
    }
}

impl std::str::FromStr for ProblemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mcq" => Ok(Self::Mcq),
            "code" => Ok(Self::Code),
            other => Err(format!("unknown problem type: {other}")),
        }
    }
}

impl std::fmt::Display for ProblemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Problem metadata as held by the relational store.
///
/// `description` holds the content key, not the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: Uuid,
    pub contest_id: Uuid,
    pub name: String,
    pub description: String,
    pub score: i32,
    #[serde(rename = "type")]
    pub problem_type: ProblemType,
    pub has_multiple_answers: bool,
    pub answer: Vec<i32>,
}

impl Problem {
    /// Content key of a problem description
    pub fn content_key(contest_id: Uuid, problem_id: Uuid) -> String {
        format!("problems/{contest_id}/{problem_id}.json")
    }
}

/// Whether an answer list marks a problem as multi-answer
pub fn has_multiple_answers(problem_type: ProblemType, answer: &[i32]) -> bool {
    problem_type == ProblemType::Mcq && answer.len() > 1
}

/// Fields supplied to create a problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProblem {
    pub name: String,
    pub description: String,
    pub score: i32,
    #[serde(rename = "type")]
    pub problem_type: ProblemType,
    #[serde(default)]
    pub answer: Vec<i32>,
}

/// Partial problem update; absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub score: Option<i32>,
    #[serde(rename = "type")]
    pub problem_type: Option<ProblemType>,
    pub answer: Option<Vec<i32>>,
}

/// Lightweight listing row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemOverview {
    pub id: Uuid,
    pub name: String,
    pub score: i32,
    #[serde(rename = "type")]
    pub problem_type: ProblemType,
}

/// Problem statement with the description resolved from the content store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemStatement {
    pub problem_id: Uuid,
    pub contest_id: Uuid,
    pub name: String,
    pub description: String,
    pub score: i32,
    #[serde(rename = "type")]
    pub problem_type: ProblemType,
    pub has_multiple_answers: bool,
}

/// JSON document stored under a problem's content key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemContent {
    pub description: String,
}
