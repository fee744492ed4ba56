//! Contest request DTOs

use serde::Deserialize;

/// Contest listing query
#[derive(Debug, Default, Deserialize)]
pub struct ListContestsQuery {
    /// 0-based page
    pub page: Option<u32>,
}
