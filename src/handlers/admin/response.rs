//! Admin response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::models::RegistrationEntry;

/// Admin probe response
#[derive(Debug, Serialize)]
pub struct AdminProbeResponse {
    pub user_id: Uuid,
    pub is_admin: bool,
}

/// Registrants of a contest
#[derive(Debug, Serialize)]
pub struct RegistrationsListResponse {
    pub contest_id: Uuid,
    pub registrations: Vec<RegistrationEntry>,
}
