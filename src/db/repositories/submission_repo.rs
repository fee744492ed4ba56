//! Submission repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    db::codec::{decode_int_list, encode_braced},
    error::{AppError, AppResult},
    models::{Submission, SubmissionStatus, SubmissionStatusView, TestCaseResult},
};

/// Submission rows and their grading results
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: &Submission) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Submission>>;

    async fn find_status(&self, id: Uuid) -> AppResult<Option<SubmissionStatusView>>;

    /// Grader results, oldest first
    async fn test_case_results(&self, submission_id: Uuid) -> AppResult<Vec<TestCaseResult>>;

    /// Newest first, ties broken by id
    async fn list_by_user_and_problem(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Submission>>;
}

fn internal(e: String) -> AppError {
    AppError::Internal(anyhow::anyhow!(e))
}

#[derive(Debug, FromRow)]
struct SubmissionRow {
    id: Uuid,
    user_id: Uuid,
    contest_id: Uuid,
    problem_id: Uuid,
    #[sqlx(rename = "type")]
    submission_type: String,
    language: Option<String>,
    choices: String,
    status: String,
    created_at: DateTime<Utc>,
    runtime: Option<i64>,
    memory: Option<i64>,
}

impl TryFrom<SubmissionRow> for Submission {
    type Error = AppError;

    fn try_from(row: SubmissionRow) -> AppResult<Self> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            contest_id: row.contest_id,
            problem_id: row.problem_id,
            submission_type: row.submission_type.parse().map_err(internal)?,
            language: row.language,
            choices: decode_int_list(&row.choices),
            status: row.status.parse().map_err(internal)?,
            created_at: row.created_at,
            runtime: row.runtime,
            memory: row.memory,
        })
    }
}

#[derive(Debug, FromRow)]
struct StatusRow {
    id: Uuid,
    user_id: Uuid,
    status: String,
}

#[derive(Debug, FromRow)]
struct TestCaseResultRow {
    id: Uuid,
    submission_id: Uuid,
    test_case_id: Uuid,
    status: String,
    runtime: Option<i64>,
    memory: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<TestCaseResultRow> for TestCaseResult {
    fn from(row: TestCaseResultRow) -> Self {
        Self {
            id: row.id,
            submission_id: row.submission_id,
            test_case_id: row.test_case_id,
            status: row.status,
            runtime: row.runtime,
            memory: row.memory,
            created_at: row.created_at,
        }
    }
}

/// Postgres-backed submission repository
#[derive(Clone)]
pub struct PgSubmissionRepository {
    pool: PgPool,
}

impl PgSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for PgSubmissionRepository {
    async fn create(&self, submission: &Submission) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO submissions (
                id, user_id, contest_id, problem_id, type, language, choices, status,
                created_at, runtime, memory
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(submission.id)
        .bind(submission.user_id)
        .bind(submission.contest_id)
        .bind(submission.problem_id)
        .bind(submission.submission_type.as_str())
        .bind(&submission.language)
        .bind(encode_braced(&submission.choices))
        .bind(submission.status.as_str())
        .bind(submission.created_at)
        .bind(submission.runtime)
        .bind(submission.memory)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Submission>> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT id, user_id, contest_id, problem_id, type, language, choices, status,
                   created_at, runtime, memory
            FROM submissions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Submission::try_from).transpose()
    }

    async fn find_status(&self, id: Uuid) -> AppResult<Option<SubmissionStatusView>> {
        let row = sqlx::query_as::<_, StatusRow>(
            r#"SELECT id, user_id, status FROM submissions WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            let status: SubmissionStatus = row.status.parse().map_err(internal)?;
            Ok(SubmissionStatusView {
                id: row.id,
                user_id: row.user_id,
                status,
            })
        })
        .transpose()
    }

    async fn test_case_results(&self, submission_id: Uuid) -> AppResult<Vec<TestCaseResult>> {
        let rows = sqlx::query_as::<_, TestCaseResultRow>(
            r#"
            SELECT id, submission_id, test_case_id, status, runtime, memory, created_at
            FROM test_case_results
            WHERE submission_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(submission_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TestCaseResult::from).collect())
    }

    async fn list_by_user_and_problem(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Submission>> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT id, user_id, contest_id, problem_id, type, language, choices, status,
                   created_at, runtime, memory
            FROM submissions
            WHERE user_id = $1 AND problem_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Submission::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Problem, ProblemType};
    use crate::test_utils::fixtures;
    use chrono::{Duration, Timelike};
    use std::collections::HashSet;

    async fn insert_problem(pool: &PgPool, contest_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO problems (id, contest_id, name, description, score, type) VALUES ($1, $2, 'p', $3, 5, 'mcq')",
        )
        .bind(id)
        .bind(contest_id)
        .bind(Problem::content_key(contest_id, id))
        .execute(pool)
        .await
        .unwrap();
        id
    }

    fn submission(user_id: Uuid, contest_id: Uuid, problem_id: Uuid, at: DateTime<Utc>) -> Submission {
        Submission {
            id: Uuid::new_v4(),
            user_id,
            contest_id,
            problem_id,
            submission_type: ProblemType::Mcq,
            language: None,
            choices: vec![1, 2],
            status: SubmissionStatus::Pending,
            created_at: at,
            runtime: None,
            memory: None,
        }
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_choices_survive_storage() {
        let pool = fixtures::test_pool().await;
        let now = Utc::now().with_nanosecond(0).unwrap();
        let user = fixtures::insert_user(&pool, 1).await;
        let contest = fixtures::insert_contest(&pool, now, &[1]).await;
        let problem = insert_problem(&pool, contest).await;
        let repo = PgSubmissionRepository::new(pool);

        let sub = submission(user, contest, problem, now);
        repo.create(&sub).await.unwrap();

        assert_eq!(repo.find_by_id(sub.id).await.unwrap(), Some(sub.clone()));
        let status = repo.find_status(sub.id).await.unwrap().unwrap();
        assert_eq!(status.status, SubmissionStatus::Pending);
        assert_eq!(status.user_id, user);
        assert!(repo.test_case_results(sub.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_pages_are_disjoint_and_newest_first() {
        let pool = fixtures::test_pool().await;
        let now = Utc::now().with_nanosecond(0).unwrap();
        let user = fixtures::insert_user(&pool, 1).await;
        let contest = fixtures::insert_contest(&pool, now, &[1]).await;
        let problem = insert_problem(&pool, contest).await;
        let repo = PgSubmissionRepository::new(pool);

        // Two submissions per instant to exercise the id tie-break
        for i in 0..25 {
            let at = now - Duration::seconds(i / 2);
            repo.create(&submission(user, contest, problem, at)).await.unwrap();
        }

        let first = repo.list_by_user_and_problem(user, problem, 20, 0).await.unwrap();
        let second = repo.list_by_user_and_problem(user, problem, 20, 20).await.unwrap();
        assert_eq!(first.len(), 20);
        assert_eq!(second.len(), 5);
        assert!(first.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let ids: HashSet<Uuid> = first.iter().chain(&second).map(|s| s.id).collect();
        assert_eq!(ids.len(), 25);
    }
}
