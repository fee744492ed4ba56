//! Ranking repository
//!
//! Scores are written by the grader; this side only toggles visibility flags.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::LeaderboardPatch};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RankingRepository: Send + Sync {
    /// Apply the supplied flags, keeping unspecified ones; returns affected rows
    async fn update_flags(
        &self,
        contest_id: Uuid,
        user_id: Uuid,
        patch: LeaderboardPatch,
    ) -> AppResult<u64>;
}

/// Postgres-backed ranking flags
#[derive(Clone)]
pub struct PgRankingRepository {
    pool: PgPool,
}

impl PgRankingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RankingRepository for PgRankingRepository {
    async fn update_flags(
        &self,
        contest_id: Uuid,
        user_id: Uuid,
        patch: LeaderboardPatch,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE rankings
            SET
                hidden = COALESCE($3, hidden),
                disqualified = COALESCE($4, disqualified)
            WHERE contest_id = $1 AND user_id = $2
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .bind(patch.hidden)
        .bind(patch.disqualified)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
