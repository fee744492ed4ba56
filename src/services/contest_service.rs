//! Contest service
//!
//! Contest administration, viewer-specific detail and the problem visibility gate.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    constants::CONTESTS_PAGE_SIZE,
    db::Storage,
    error::{AppError, AppResult, Entity},
    models::{Contest, ContestDetail, ContestInput, RunningStatus},
    utils::{Clock, IdGenerator},
};

/// Contest service for business logic
#[derive(Clone)]
pub struct ContestService {
    storage: Storage,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl ContestService {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            storage,
            clock,
            ids,
        }
    }

    /// Create a new contest
    pub async fn create_contest(&self, input: ContestInput) -> AppResult<Contest> {
        validate_windows(&input)?;

        let contest = Contest::from_input(self.ids.generate(), input);
        self.storage.contests.create(&contest).await?;

        tracing::info!(contest_id = %contest.id, name = %contest.name, "Contest created");
        Ok(contest)
    }

    /// Replace every field of a contest
    pub async fn update_contest(&self, id: Uuid, input: ContestInput) -> AppResult<Contest> {
        validate_windows(&input)?;

        let contest = Contest::from_input(id, input);
        if !self.storage.contests.update(&contest).await? {
            return Err(AppError::not_found(Entity::Contest, id));
        }

        tracing::info!(contest_id = %id, "Contest updated");
        Ok(contest)
    }

    /// Delete a contest. Its problems must be deleted first so their content
    /// is cleaned up; otherwise `ContestHasProblems`.
    pub async fn delete_contest(&self, id: Uuid) -> AppResult<()> {
        if !self.storage.contests.delete(id).await? {
            return Err(AppError::not_found(Entity::Contest, id));
        }

        tracing::info!(contest_id = %id, "Contest deleted");
        Ok(())
    }

    /// Get a contest with its current statuses.
    ///
    /// `is_registered` is filled only when a viewer is given.
    pub async fn get_contest(&self, id: Uuid, viewer: Option<Uuid>) -> AppResult<ContestDetail> {
        let contest = self.find_contest(id).await?;

        let is_registered = match viewer {
            Some(user_id) => Some(self.storage.registrations.is_registered(id, user_id).await?),
            None => None,
        };

        Ok(self.detail(contest, is_registered))
    }

    /// List contests, latest start first. `page` is 0-based.
    pub async fn list_contests(&self, page: u32) -> AppResult<Vec<ContestDetail>> {
        let offset = i64::from(page) * CONTESTS_PAGE_SIZE;
        let contests = self
            .storage
            .contests
            .list(CONTESTS_PAGE_SIZE, offset)
            .await?;

        Ok(contests
            .into_iter()
            .map(|contest| self.detail(contest, None))
            .collect())
    }

    /// Decide whether `user_id` may see the problems of a contest.
    ///
    /// Problems stay visible after the contest ends.
    pub async fn check_visibility(&self, contest_id: Uuid, user_id: Uuid) -> AppResult<Contest> {
        let contest = self.find_contest(contest_id).await?;

        if !self
            .storage
            .registrations
            .is_registered(contest_id, user_id)
            .await?
        {
            return Err(AppError::UserNotRegistered {
                contest_id,
                user_id,
            });
        }

        if contest.running_status_at(self.clock.now()) == RunningStatus::Upcoming {
            return Err(AppError::ContestNotRunning { contest_id });
        }

        Ok(contest)
    }

    async fn find_contest(&self, id: Uuid) -> AppResult<Contest> {
        self.storage
            .contests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(Entity::Contest, id))
    }

    fn detail(&self, contest: Contest, is_registered: Option<bool>) -> ContestDetail {
        let now = self.clock.now();
        ContestDetail {
            registration_status: contest.registration_status_at(now),
            running_status: contest.running_status_at(now),
            contest,
            is_registered,
        }
    }
}

fn validate_windows(input: &ContestInput) -> AppResult<()> {
    if input.registration_start_time > input.registration_end_time {
        return Err(AppError::Validation(
            "registration must start before it ends".to_string(),
        ));
    }
    if input.start_time >= input.end_time {
        return Err(AppError::Validation(
            "contest must start before it ends".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{MockContestRepository, MockRegistrationRepository};
    use crate::models::RegistrationStatus;
    use crate::services::fakes::MemoryDb;
    use crate::utils::{FixedClock, UuidGenerator};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    fn input() -> ContestInput {
        ContestInput {
            name: "Weekly Quiz".into(),
            description: "Round 1".into(),
            registration_start_time: t0(),
            registration_end_time: t0() + Duration::seconds(3600),
            start_time: t0() + Duration::seconds(3600),
            end_time: t0() + Duration::seconds(7200),
            eligible_to: vec![1, 2],
        }
    }

    fn service_at(storage: Storage, now: DateTime<Utc>) -> ContestService {
        ContestService::new(storage, Arc::new(FixedClock(now)), Arc::new(UuidGenerator))
    }

    #[tokio::test]
    async fn test_create_then_get_reports_statuses() {
        let db = MemoryDb::new();
        let service = service_at(db.storage(), t0() + Duration::seconds(10));

        let contest = service.create_contest(input()).await.unwrap();
        let detail = service.get_contest(contest.id, None).await.unwrap();

        assert_eq!(detail.contest, contest);
        assert_eq!(detail.registration_status, RegistrationStatus::Open);
        assert_eq!(detail.running_status, RunningStatus::Upcoming);
        assert_eq!(detail.is_registered, None);
    }

    #[tokio::test]
    async fn test_get_contest_with_viewer_reports_registration() {
        let db = MemoryDb::new();
        let service = service_at(db.storage(), t0());
        let contest = service.create_contest(input()).await.unwrap();
        let user = db.add_user(1);
        db.registrations
            .lock()
            .unwrap()
            .insert((contest.id, user), t0());

        let detail = service.get_contest(contest.id, Some(user)).await.unwrap();
        assert_eq!(detail.is_registered, Some(true));

        let stranger = service
            .get_contest(contest.id, Some(Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!(stranger.is_registered, Some(false));
    }

    #[tokio::test]
    async fn test_rejects_inverted_windows() {
        let service = service_at(MemoryDb::new().storage(), t0());
        let mut bad = input();
        bad.end_time = bad.start_time;

        let err = service.create_contest(bad).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_refused_while_problems_remain() {
        use crate::models::{Problem, ProblemType};

        let db = MemoryDb::new();
        let service = service_at(db.storage(), t0());
        let contest = service.create_contest(input()).await.unwrap();

        let problem_id = Uuid::new_v4();
        db.problems.lock().unwrap().insert(
            problem_id,
            Problem {
                id: problem_id,
                contest_id: contest.id,
                name: "Primes".into(),
                description: Problem::content_key(contest.id, problem_id),
                score: 10,
                problem_type: ProblemType::Mcq,
                has_multiple_answers: false,
                answer: vec![2],
            },
        );

        let err = service.delete_contest(contest.id).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::ContestHasProblems { contest_id } if contest_id == contest.id
        ));
        assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
        assert!(service.get_contest(contest.id, None).await.is_ok());

        db.problems.lock().unwrap().remove(&problem_id);
        service.delete_contest(contest.id).await.unwrap();
        assert!(matches!(
            service.get_contest(contest.id, None).await,
            Err(AppError::NotFound { entity: Entity::Contest, .. })
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_contest() {
        let mut contests = MockContestRepository::new();
        contests.expect_update().returning(|_| Ok(false));
        contests.expect_delete().returning(|_| Ok(false));

        let mut storage = Storage::mocked();
        storage.contests = Arc::new(contests);
        let service = service_at(storage, t0());

        let id = Uuid::new_v4();
        assert!(matches!(
            service.update_contest(id, input()).await,
            Err(AppError::NotFound { entity: Entity::Contest, .. })
        ));
        assert!(matches!(
            service.delete_contest(id).await,
            Err(AppError::NotFound { entity: Entity::Contest, .. })
        ));
    }

    #[tokio::test]
    async fn test_list_contests_pages_by_twenty() {
        let mut contests = MockContestRepository::new();
        contests
            .expect_list()
            .withf(|limit, offset| *limit == 20 && *offset == 40)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let mut storage = Storage::mocked();
        storage.contests = Arc::new(contests);

        let listed = service_at(storage, t0()).list_contests(2).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_visibility_gate_order() {
        let db = MemoryDb::new();
        let contest = Contest::from_input(Uuid::new_v4(), input());
        db.add_contest(contest.clone());
        let user = db.add_user(1);

        // Unknown contest
        let early = service_at(db.storage(), t0());
        assert!(matches!(
            early.check_visibility(Uuid::new_v4(), user).await,
            Err(AppError::NotFound { entity: Entity::Contest, .. })
        ));

        // Not registered comes before the running check
        assert!(matches!(
            early.check_visibility(contest.id, user).await,
            Err(AppError::UserNotRegistered { .. })
        ));

        db.registrations
            .lock()
            .unwrap()
            .insert((contest.id, user), t0());
        assert!(matches!(
            early.check_visibility(contest.id, user).await,
            Err(AppError::ContestNotRunning { .. })
        ));

        let running = service_at(db.storage(), t0() + Duration::seconds(3600));
        assert!(running.check_visibility(contest.id, user).await.is_ok());

        let ended = service_at(db.storage(), t0() + Duration::seconds(9000));
        assert!(ended.check_visibility(contest.id, user).await.is_ok());
    }

    #[tokio::test]
    async fn test_visibility_checks_registration_through_ledger() {
        let mut contests = MockContestRepository::new();
        let contest = Contest::from_input(Uuid::new_v4(), input());
        let found = contest.clone();
        contests
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));

        let mut registrations = MockRegistrationRepository::new();
        registrations
            .expect_is_registered()
            .times(1)
            .returning(|_, _| Ok(true));

        let mut storage = Storage::mocked();
        storage.contests = Arc::new(contests);
        storage.registrations = Arc::new(registrations);

        let service = service_at(storage, t0() + Duration::seconds(4000));
        let visible = service
            .check_visibility(contest.id, Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(visible.id, contest.id);
    }
}
