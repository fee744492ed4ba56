//! Contest repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    db::codec::{decode_int_list, encode_csv},
    error::{AppError, AppResult},
    models::Contest,
};

/// Contest rows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContestRepository: Send + Sync {
    async fn create(&self, contest: &Contest) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Contest>>;

    async fn exists(&self, id: Uuid) -> AppResult<bool>;

    /// Replace every mutable column; `false` when no row matched
    async fn update(&self, contest: &Contest) -> AppResult<bool>;

    /// `false` when no row matched; `ContestHasProblems` while problem rows remain
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Contests ordered by start time, latest first
    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Contest>>;
}

#[derive(Debug, FromRow)]
struct ContestRow {
    id: Uuid,
    name: String,
    description: String,
    registration_start_time: DateTime<Utc>,
    registration_end_time: DateTime<Utc>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    eligible_to: String,
}

impl From<ContestRow> for Contest {
    fn from(row: ContestRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            registration_start_time: row.registration_start_time,
            registration_end_time: row.registration_end_time,
            start_time: row.start_time,
            end_time: row.end_time,
            eligible_to: decode_int_list(&row.eligible_to),
        }
    }
}

/// Postgres-backed contest repository
#[derive(Clone)]
pub struct PgContestRepository {
    pool: PgPool,
}

impl PgContestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContestRepository for PgContestRepository {
    async fn create(&self, contest: &Contest) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contests (
                id, name, description, registration_start_time, registration_end_time,
                start_time, end_time, eligible_to
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(contest.id)
        .bind(&contest.name)
        .bind(&contest.description)
        .bind(contest.registration_start_time)
        .bind(contest.registration_end_time)
        .bind(contest.start_time)
        .bind(contest.end_time)
        .bind(encode_csv(&contest.eligible_to))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Contest>> {
        let row = sqlx::query_as::<_, ContestRow>(
            r#"
            SELECT id, name, description, registration_start_time, registration_end_time,
                   start_time, end_time, eligible_to
            FROM contests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Contest::from))
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM contests WHERE id = $1)"#)
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, contest: &Contest) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE contests
            SET
                name = $2,
                description = $3,
                registration_start_time = $4,
                registration_end_time = $5,
                start_time = $6,
                end_time = $7,
                eligible_to = $8
            WHERE id = $1
            "#,
        )
        .bind(contest.id)
        .bind(&contest.name)
        .bind(&contest.description)
        .bind(contest.registration_start_time)
        .bind(contest.registration_end_time)
        .bind(contest.start_time)
        .bind(contest.end_time)
        .bind(encode_csv(&contest.eligible_to))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM contests WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(AppError::ContestHasProblems { contest_id: id })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Contest>> {
        let rows = sqlx::query_as::<_, ContestRow>(
            r#"
            SELECT id, name, description, registration_start_time, registration_end_time,
                   start_time, end_time, eligible_to
            FROM contests
            ORDER BY start_time DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Contest::from).collect())
    }
}
