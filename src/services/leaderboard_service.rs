//! Leaderboard adjuster
//!
//! Ranks are computed elsewhere; this only hides or disqualifies entries.

use uuid::Uuid;

use crate::{
    db::Storage,
    error::{AppError, AppResult, Entity},
    models::LeaderboardPatch,
};

#[derive(Clone)]
pub struct LeaderboardService {
    storage: Storage,
}

impl LeaderboardService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Set the flags given in `patch`; unspecified flags keep their value
    pub async fn update_entry(
        &self,
        contest_id: Uuid,
        user_id: Uuid,
        patch: LeaderboardPatch,
    ) -> AppResult<()> {
        if patch.is_empty() {
            return Err(AppError::Validation("no fields to update".to_string()));
        }

        let affected = self
            .storage
            .rankings
            .update_flags(contest_id, user_id, patch)
            .await?;

        if affected == 0 {
            return Err(AppError::not_found(
                Entity::LeaderboardEntry,
                format!("{contest_id}/{user_id}"),
            ));
        }

        tracing::info!(
            contest_id = %contest_id,
            user_id = %user_id,
            hidden = ?patch.hidden,
            disqualified = ?patch.disqualified,
            "Leaderboard entry updated"
        );
        Ok(())
    }
}
