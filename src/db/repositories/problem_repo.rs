//! Problem repository
//!
//! Rows hold metadata and the content key of the statement; the statement
//! itself lives in the content store.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Problem, ProblemOverview, ProblemType},
};

/// Problem rows, always addressed within their contest
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProblemRepository: Send + Sync {
    async fn create(&self, problem: &Problem) -> AppResult<()>;

    async fn find(&self, contest_id: Uuid, problem_id: Uuid) -> AppResult<Option<Problem>>;

    /// `false` when no row matched
    async fn update(&self, problem: &Problem) -> AppResult<bool>;

    /// `false` when no row matched
    async fn delete(&self, contest_id: Uuid, problem_id: Uuid) -> AppResult<bool>;

    async fn list_overviews(&self, contest_id: Uuid) -> AppResult<Vec<ProblemOverview>>;
}

fn parse_type(raw: &str) -> AppResult<ProblemType> {
    raw.parse()
        .map_err(|e: String| AppError::Internal(anyhow::anyhow!(e)))
}

#[derive(Debug, FromRow)]
struct ProblemRow {
    id: Uuid,
    contest_id: Uuid,
    name: String,
    description: String,
    score: i32,
    #[sqlx(rename = "type")]
    problem_type: String,
    has_multiple_answers: bool,
    answer: Vec<i32>,
}

impl TryFrom<ProblemRow> for Problem {
    type Error = AppError;

    fn try_from(row: ProblemRow) -> AppResult<Self> {
        Ok(Self {
            id: row.id,
            contest_id: row.contest_id,
            name: row.name,
            description: row.description,
            score: row.score,
            problem_type: parse_type(&row.problem_type)?,
            has_multiple_answers: row.has_multiple_answers,
            answer: row.answer,
        })
    }
}

#[derive(Debug, FromRow)]
struct OverviewRow {
    id: Uuid,
    name: String,
    score: i32,
    #[sqlx(rename = "type")]
    problem_type: String,
}

/// Postgres-backed problem repository
#[derive(Clone)]
pub struct PgProblemRepository {
    pool: PgPool,
}

impl PgProblemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProblemRepository for PgProblemRepository {
    async fn create(&self, problem: &Problem) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO problems (
                id, contest_id, name, description, score, type, has_multiple_answers, answer
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(problem.id)
        .bind(problem.contest_id)
        .bind(&problem.name)
        .bind(&problem.description)
        .bind(problem.score)
        .bind(problem.problem_type.as_str())
        .bind(problem.has_multiple_answers)
        .bind(&problem.answer)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, contest_id: Uuid, problem_id: Uuid) -> AppResult<Option<Problem>> {
        let row = sqlx::query_as::<_, ProblemRow>(
            r#"
            SELECT id, contest_id, name, description, score, type, has_multiple_answers, answer
            FROM problems
            WHERE id = $1 AND contest_id = $2
            "#,
        )
        .bind(problem_id)
        .bind(contest_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Problem::try_from).transpose()
    }

    async fn update(&self, problem: &Problem) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE problems
            SET
                name = $3,
                score = $4,
                type = $5,
                has_multiple_answers = $6,
                answer = $7
            WHERE id = $1 AND contest_id = $2
            "#,
        )
        .bind(problem.id)
        .bind(problem.contest_id)
        .bind(&problem.name)
        .bind(problem.score)
        .bind(problem.problem_type.as_str())
        .bind(problem.has_multiple_answers)
        .bind(&problem.answer)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, contest_id: Uuid, problem_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM problems WHERE id = $1 AND contest_id = $2"#)
            .bind(problem_id)
            .bind(contest_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_overviews(&self, contest_id: Uuid) -> AppResult<Vec<ProblemOverview>> {
        let rows = sqlx::query_as::<_, OverviewRow>(
            r#"
            SELECT id, name, score, type
            FROM problems
            WHERE contest_id = $1
            ORDER BY name ASC, id ASC
            "#,
        )
        .bind(contest_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(ProblemOverview {
                    id: row.id,
                    name: row.name,
                    score: row.score,
                    problem_type: parse_type(&row.problem_type)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use chrono::Utc;

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_rows_are_scoped_to_their_contest() {
        let pool = fixtures::test_pool().await;
        let contest = fixtures::insert_contest(&pool, Utc::now(), &[1]).await;
        let other = fixtures::insert_contest(&pool, Utc::now(), &[1]).await;
        let repo = PgProblemRepository::new(pool);

        let id = Uuid::new_v4();
        let mut problem = Problem {
            id,
            contest_id: contest,
            name: "Primes".into(),
            description: Problem::content_key(contest, id),
            score: 10,
            problem_type: ProblemType::Mcq,
            has_multiple_answers: true,
            answer: vec![1, 3],
        };
        repo.create(&problem).await.unwrap();

        assert_eq!(repo.find(contest, id).await.unwrap(), Some(problem.clone()));
        assert!(repo.find(other, id).await.unwrap().is_none());

        problem.answer = vec![2];
        problem.has_multiple_answers = false;
        assert!(repo.update(&problem).await.unwrap());
        assert_eq!(repo.find(contest, id).await.unwrap().unwrap().answer, vec![2]);

        let overviews = repo.list_overviews(contest).await.unwrap();
        assert_eq!(overviews.len(), 1);
        assert_eq!(overviews[0].problem_type, ProblemType::Mcq);
        assert!(repo.list_overviews(other).await.unwrap().is_empty());

        assert!(!repo.delete(other, id).await.unwrap());
        assert!(repo.delete(contest, id).await.unwrap());
    }
}
