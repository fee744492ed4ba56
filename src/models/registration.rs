//! Registration ledger models

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Registration joined with the registrant's profile
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct RegistrationEntry {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub usn: String,
    pub department: String,
    pub current_year: i32,
    pub registered_at: DateTime<Utc>,
}
