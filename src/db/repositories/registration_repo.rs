//! Registration repository
//!
//! The `UNIQUE (contest_id, user_id)` constraint is the only guard against
//! duplicate registrations; callers learn the outcome from the affected rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::RegistrationEntry};

/// Contest registration ledger
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert the pair; `false` when it was already present
    async fn register(
        &self,
        contest_id: Uuid,
        user_id: Uuid,
        registered_at: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Remove the pair; `false` when it was absent
    async fn unregister(&self, contest_id: Uuid, user_id: Uuid) -> AppResult<bool>;

    async fn is_registered(&self, contest_id: Uuid, user_id: Uuid) -> AppResult<bool>;

    /// Registrants with their profile, earliest first
    async fn list(&self, contest_id: Uuid) -> AppResult<Vec<RegistrationEntry>>;
}

/// Postgres-backed registration ledger
#[derive(Clone)]
pub struct PgRegistrationRepository {
    pool: PgPool,
}

impl PgRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for PgRegistrationRepository {
    async fn register(
        &self,
        contest_id: Uuid,
        user_id: Uuid,
        registered_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO contest_registrations (contest_id, user_id, registered_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (contest_id, user_id) DO NOTHING
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .bind(registered_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn unregister(&self, contest_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r#"DELETE FROM contest_registrations WHERE contest_id = $1 AND user_id = $2"#,
        )
        .bind(contest_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_registered(&self, contest_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let registered: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM contest_registrations
                WHERE contest_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(registered)
    }

    async fn list(&self, contest_id: Uuid) -> AppResult<Vec<RegistrationEntry>> {
        let entries = sqlx::query_as::<_, RegistrationEntry>(
            r#"
            SELECT
                u.id AS user_id,
                u.name,
                u.email,
                u.usn,
                u.department,
                u.current_year,
                cr.registered_at
            FROM contest_registrations cr
            INNER JOIN users u ON cr.user_id = u.id
            WHERE cr.contest_id = $1
            ORDER BY cr.registered_at ASC
            "#,
        )
        .bind(contest_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
