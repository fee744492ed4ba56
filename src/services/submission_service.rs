//! Submission lifecycle
//!
//! The row is written first, then the code blob under the submission id.
//! A failed blob write leaves a pending submission without code; the grader
//! reports it and nothing here compensates.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    constants::SUBMISSIONS_PAGE_SIZE,
    db::Storage,
    error::{AppError, AppResult, Entity},
    models::{
        NewSubmission, ProblemType, Submission, SubmissionDetails, SubmissionStatus,
        SubmissionStatusView,
    },
    storage::{ContentStore, PutMode},
    utils::{Clock, IdGenerator},
};

/// Submission service for business logic
#[derive(Clone)]
pub struct SubmissionService {
    storage: Storage,
    content: Arc<dyn ContentStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl SubmissionService {
    pub fn new(
        storage: Storage,
        content: Arc<dyn ContentStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            storage,
            content,
            clock,
            ids,
        }
    }

    /// Record a new pending submission.
    ///
    /// The caller has already passed the visibility gate for the contest.
    pub async fn create_submission(
        &self,
        user_id: Uuid,
        input: NewSubmission,
    ) -> AppResult<Submission> {
        let code = match input.submission_type {
            ProblemType::Code => Some(input.code.ok_or_else(|| {
                AppError::Validation("code submissions must include code".to_string())
            })?),
            ProblemType::Mcq => None,
        };

        let problem = self
            .storage
            .problems
            .find(input.contest_id, input.problem_id)
            .await?
            .ok_or_else(|| AppError::not_found(Entity::Problem, input.problem_id))?;

        if problem.problem_type != input.submission_type {
            return Err(AppError::Validation(format!(
                "problem expects a {} submission",
                problem.problem_type
            )));
        }

        let submission = Submission {
            id: self.ids.generate(),
            user_id,
            contest_id: input.contest_id,
            problem_id: input.problem_id,
            submission_type: input.submission_type,
            language: input.language,
            choices: match input.submission_type {
                ProblemType::Mcq => input.choices,
                ProblemType::Code => Vec::new(),
            },
            status: SubmissionStatus::Pending,
            created_at: self.clock.now(),
            runtime: None,
            memory: None,
        };

        self.storage.submissions.create(&submission).await?;

        if let Some(code) = code {
            let key = submission.id.to_string();
            if let Err(e) = self.content.put(&key, &code, PutMode::CreateOnly).await {
                tracing::error!(
                    submission_id = %submission.id,
                    user_id = %user_id,
                    key = %key,
                    error = %e,
                    "Code write failed after submission insert, submission has no code"
                );
                return Err(e.into());
            }
        }

        tracing::info!(
            submission_id = %submission.id,
            user_id = %user_id,
            problem_id = %submission.problem_id,
            submission_type = %submission.submission_type,
            "Submission created"
        );
        Ok(submission)
    }

    /// Cheap status lookup for polling
    pub async fn get_status(&self, id: Uuid) -> AppResult<SubmissionStatusView> {
        self.storage
            .submissions
            .find_status(id)
            .await?
            .ok_or_else(|| AppError::not_found(Entity::Submission, id))
    }

    /// Metadata, code and grading results of a submission
    pub async fn get_details(&self, id: Uuid) -> AppResult<SubmissionDetails> {
        let submission = self
            .storage
            .submissions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(Entity::Submission, id))?;

        let code = match submission.submission_type {
            ProblemType::Code => Some(self.content.get(&submission.id.to_string()).await?),
            ProblemType::Mcq => None,
        };

        let test_case_results = self.storage.submissions.test_case_results(id).await?;

        Ok(SubmissionDetails {
            submission,
            code,
            test_case_results,
        })
    }

    /// One page of a user's submissions to a problem, newest first. `page` is 0-based.
    pub async fn list_by_user_and_problem(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
        page: u32,
    ) -> AppResult<Vec<Submission>> {
        let offset = i64::from(page) * SUBMISSIONS_PAGE_SIZE;
        self.storage
            .submissions
            .list_by_user_and_problem(user_id, problem_id, SUBMISSIONS_PAGE_SIZE, offset)
            .await
    }
}
