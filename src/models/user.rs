//! User profile model

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Profile fields the contest core reads from the user directory
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub usn: String,
    pub department: String,
    /// Cohort used for contest eligibility
    pub current_year: i32,
}
