//! Problem content coordinator
//!
//! Problem metadata lives in Postgres, the statement in the content store.
//! There is no transaction spanning both; each operation writes in a fixed order
//! and logs the gap it leaves behind when the second step fails:
//!
//! - create writes the blob first, so a row never points at missing content
//! - update overwrites the blob first, then the row
//! - delete removes the row first, so the problem disappears immediately

use std::sync::Arc;

use anyhow::Context;
use uuid::Uuid;

use crate::{
    db::Storage,
    error::{AppError, AppResult, Entity},
    models::{
        NewProblem, Problem, ProblemContent, ProblemOverview, ProblemStatement, ProblemUpdate,
        has_multiple_answers,
    },
    storage::{ContentStore, PutMode},
    utils::IdGenerator,
};

/// Problem service for business logic
#[derive(Clone)]
pub struct ProblemService {
    storage: Storage,
    content: Arc<dyn ContentStore>,
    ids: Arc<dyn IdGenerator>,
}

impl ProblemService {
    pub fn new(
        storage: Storage,
        content: Arc<dyn ContentStore>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            storage,
            content,
            ids,
        }
    }

    /// Create a problem and store its statement
    pub async fn create_problem(&self, contest_id: Uuid, input: NewProblem) -> AppResult<Problem> {
        if !self.storage.contests.exists(contest_id).await? {
            return Err(AppError::not_found(Entity::Contest, contest_id));
        }

        let id = self.ids.generate();
        let key = Problem::content_key(contest_id, id);

        self.content
            .put(&key, &encode_content(&input.description)?, PutMode::CreateOnly)
            .await?;

        let problem = Problem {
            id,
            contest_id,
            name: input.name,
            description: key,
            score: input.score,
            problem_type: input.problem_type,
            has_multiple_answers: has_multiple_answers(input.problem_type, &input.answer),
            answer: input.answer,
        };

        if let Err(e) = self.storage.problems.create(&problem).await {
            tracing::warn!(
                contest_id = %contest_id,
                problem_id = %id,
                key = %problem.description,
                error = %e,
                "Problem insert failed after content write, orphaned content left behind"
            );
            return Err(e);
        }

        tracing::info!(contest_id = %contest_id, problem_id = %id, "Problem created");
        Ok(problem)
    }

    /// Apply a partial update. The content key never changes.
    pub async fn update_problem(
        &self,
        contest_id: Uuid,
        problem_id: Uuid,
        update: ProblemUpdate,
    ) -> AppResult<Problem> {
        let mut problem = self.find_problem(contest_id, problem_id).await?;

        if let Some(name) = update.name {
            problem.name = name;
        }
        if let Some(score) = update.score {
            problem.score = score;
        }
        if let Some(problem_type) = update.problem_type {
            problem.problem_type = problem_type;
        }
        if let Some(answer) = update.answer {
            problem.answer = answer;
        }
        problem.has_multiple_answers = has_multiple_answers(problem.problem_type, &problem.answer);

        if let Some(description) = &update.description {
            self.content
                .put(
                    &problem.description,
                    &encode_content(description)?,
                    PutMode::Overwrite,
                )
                .await?;
        }

        match self.storage.problems.update(&problem).await {
            Ok(true) => {}
            Ok(false) => {
                // the row vanished after the lookup; the overwrite re-created its blob
                if update.description.is_some() {
                    self.discard_content(contest_id, problem_id, &problem.description)
                        .await;
                }
                return Err(AppError::not_found(Entity::Problem, problem_id));
            }
            Err(e) => {
                if update.description.is_some() {
                    tracing::error!(
                        contest_id = %contest_id,
                        problem_id = %problem_id,
                        error = %e,
                        "Problem content overwritten but row update failed, metadata is stale"
                    );
                }
                return Err(e);
            }
        }

        tracing::info!(contest_id = %contest_id, problem_id = %problem_id, "Problem updated");
        Ok(problem)
    }

    /// Delete a problem; content cleanup is best effort
    pub async fn delete_problem(&self, contest_id: Uuid, problem_id: Uuid) -> AppResult<()> {
        let problem = self.find_problem(contest_id, problem_id).await?;

        if !self.storage.problems.delete(contest_id, problem_id).await? {
            return Err(AppError::not_found(Entity::Problem, problem_id));
        }

        self.discard_content(contest_id, problem_id, &problem.description)
            .await;

        tracing::info!(contest_id = %contest_id, problem_id = %problem_id, "Problem deleted");
        Ok(())
    }

    /// Get a problem with its statement resolved from the content store
    pub async fn get_problem(
        &self,
        contest_id: Uuid,
        problem_id: Uuid,
    ) -> AppResult<ProblemStatement> {
        let problem = self.find_problem(contest_id, problem_id).await?;

        let raw = self.content.get(&problem.description).await?;
        let content: ProblemContent = serde_json::from_str(&raw)
            .with_context(|| format!("malformed problem content at {}", problem.description))?;

        Ok(ProblemStatement {
            problem_id: problem.id,
            contest_id: problem.contest_id,
            name: problem.name,
            description: content.description,
            score: problem.score,
            problem_type: problem.problem_type,
            has_multiple_answers: problem.has_multiple_answers,
        })
    }

    /// Problems of a contest without their statements
    pub async fn list_problems(&self, contest_id: Uuid) -> AppResult<Vec<ProblemOverview>> {
        if !self.storage.contests.exists(contest_id).await? {
            return Err(AppError::not_found(Entity::Contest, contest_id));
        }
        self.storage.problems.list_overviews(contest_id).await
    }

    /// Best-effort blob removal for a problem whose row is gone
    async fn discard_content(&self, contest_id: Uuid, problem_id: Uuid, key: &str) {
        if let Err(e) = self.content.delete(key).await {
            tracing::warn!(
                contest_id = %contest_id,
                problem_id = %problem_id,
                key = %key,
                error = %e,
                "Failed to delete problem content, orphaned content left behind"
            );
        }
    }

    async fn find_problem(&self, contest_id: Uuid, problem_id: Uuid) -> AppResult<Problem> {
        self.storage
            .problems
            .find(contest_id, problem_id)
            .await?
            .ok_or_else(|| AppError::not_found(Entity::Problem, problem_id))
    }
}

fn encode_content(description: &str) -> AppResult<String> {
    let body = serde_json::to_string(&ProblemContent {
        description: description.to_string(),
    })
    .context("failed to encode problem content")?;
    Ok(body)
}
