//! In-memory repositories for service tests.
//!
//! One `MemoryDb` implements every repository trait so a test can check state
//! across operations (create then get, register twice) without Postgres.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    db::repositories::{
        AdminRepository, ContestRepository, ProblemRepository, RankingRepository,
        RegistrationRepository, Storage, SubmissionRepository, UserRepository,
    },
    error::{AppError, AppResult},
    models::{
        Contest, LeaderboardPatch, Problem, ProblemOverview, RegistrationEntry, Submission,
        SubmissionStatusView, TestCaseResult, UserProfile,
    },
};

#[derive(Default)]
pub struct MemoryDb {
    pub contests: Mutex<HashMap<Uuid, Contest>>,
    pub registrations: Mutex<HashMap<(Uuid, Uuid), DateTime<Utc>>>,
    pub users: Mutex<HashMap<Uuid, UserProfile>>,
    pub problems: Mutex<HashMap<Uuid, Problem>>,
    pub submissions: Mutex<Vec<Submission>>,
    pub results: Mutex<Vec<TestCaseResult>>,
    pub rankings: Mutex<HashMap<(Uuid, Uuid), (bool, bool)>>,
    pub admins: Mutex<HashSet<Uuid>>,
}

impl MemoryDb {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn storage(self: &Arc<Self>) -> Storage {
        Storage {
            contests: self.clone(),
            registrations: self.clone(),
            problems: self.clone(),
            submissions: self.clone(),
            rankings: self.clone(),
            admins: self.clone(),
            users: self.clone(),
        }
    }

    pub fn add_user(&self, current_year: i32) -> Uuid {
        let id = Uuid::new_v4();
        self.users.lock().unwrap().insert(
            id,
            UserProfile {
                id,
                name: format!("user-{current_year}"),
                email: format!("{id}@example.test"),
                usn: "USN".into(),
                department: "CSE".into(),
                current_year,
            },
        );
        id
    }

    pub fn add_contest(&self, contest: Contest) {
        self.contests.lock().unwrap().insert(contest.id, contest);
    }
}

#[async_trait]
impl ContestRepository for MemoryDb {
    async fn create(&self, contest: &Contest) -> AppResult<()> {
        self.add_contest(contest.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Contest>> {
        Ok(self.contests.lock().unwrap().get(&id).cloned())
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.contests.lock().unwrap().contains_key(&id))
    }

    async fn update(&self, contest: &Contest) -> AppResult<bool> {
        let mut contests = self.contests.lock().unwrap();
        match contests.get_mut(&contest.id) {
            Some(stored) => {
                *stored = contest.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let has_problems = self
            .problems
            .lock()
            .unwrap()
            .values()
            .any(|p| p.contest_id == id);
        if has_problems {
            return Err(AppError::ContestHasProblems { contest_id: id });
        }
        Ok(self.contests.lock().unwrap().remove(&id).is_some())
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Contest>> {
        let mut contests: Vec<Contest> = self.contests.lock().unwrap().values().cloned().collect();
        contests.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(b.id.cmp(&a.id)));
        Ok(contests
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}

#[async_trait]
impl RegistrationRepository for MemoryDb {
    async fn register(
        &self,
        contest_id: Uuid,
        user_id: Uuid,
        registered_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut registrations = self.registrations.lock().unwrap();
        if registrations.contains_key(&(contest_id, user_id)) {
            return Ok(false);
        }
        registrations.insert((contest_id, user_id), registered_at);
        Ok(true)
    }

    async fn unregister(&self, contest_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .remove(&(contest_id, user_id))
            .is_some())
    }

    async fn is_registered(&self, contest_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .contains_key(&(contest_id, user_id)))
    }

    async fn list(&self, contest_id: Uuid) -> AppResult<Vec<RegistrationEntry>> {
        let users = self.users.lock().unwrap();
        let mut entries: Vec<RegistrationEntry> = self
            .registrations
            .lock()
            .unwrap()
            .iter()
            .filter(|((contest, _), _)| *contest == contest_id)
            .filter_map(|((_, user), at)| {
                users.get(user).map(|profile| RegistrationEntry {
                    user_id: profile.id,
                    name: profile.name.clone(),
                    email: profile.email.clone(),
                    usn: profile.usn.clone(),
                    department: profile.department.clone(),
                    current_year: profile.current_year,
                    registered_at: *at,
                })
            })
            .collect();
        entries.sort_by_key(|entry| entry.registered_at);
        Ok(entries)
    }
}

#[async_trait]
impl UserRepository for MemoryDb {
    async fn find_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }
}

#[async_trait]
impl ProblemRepository for MemoryDb {
    async fn create(&self, problem: &Problem) -> AppResult<()> {
        self.problems
            .lock()
            .unwrap()
            .insert(problem.id, problem.clone());
        Ok(())
    }

    async fn find(&self, contest_id: Uuid, problem_id: Uuid) -> AppResult<Option<Problem>> {
        Ok(self
            .problems
            .lock()
            .unwrap()
            .get(&problem_id)
            .filter(|p| p.contest_id == contest_id)
            .cloned())
    }

    async fn update(&self, problem: &Problem) -> AppResult<bool> {
        let mut problems = self.problems.lock().unwrap();
        match problems.get_mut(&problem.id) {
            Some(stored) if stored.contest_id == problem.contest_id => {
                // The content key column is never rewritten
                let key = stored.description.clone();
                *stored = Problem {
                    description: key,
                    ..problem.clone()
                };
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, contest_id: Uuid, problem_id: Uuid) -> AppResult<bool> {
        let mut problems = self.problems.lock().unwrap();
        if problems
            .get(&problem_id)
            .is_some_and(|p| p.contest_id == contest_id)
        {
            problems.remove(&problem_id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn list_overviews(&self, contest_id: Uuid) -> AppResult<Vec<ProblemOverview>> {
        Ok(self
            .problems
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.contest_id == contest_id)
            .map(|p| ProblemOverview {
                id: p.id,
                name: p.name.clone(),
                score: p.score,
                problem_type: p.problem_type,
            })
            .collect())
    }
}

#[async_trait]
impl SubmissionRepository for MemoryDb {
    async fn create(&self, submission: &Submission) -> AppResult<()> {
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Submission>> {
        Ok(self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_status(&self, id: Uuid) -> AppResult<Option<SubmissionStatusView>> {
        Ok(SubmissionRepository::find_by_id(self, id)
            .await?
            .map(|s| SubmissionStatusView {
                id: s.id,
                user_id: s.user_id,
                status: s.status,
            }))
    }

    async fn test_case_results(&self, submission_id: Uuid) -> AppResult<Vec<TestCaseResult>> {
        let mut results: Vec<TestCaseResult> = self
            .results
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.submission_id == submission_id)
            .cloned()
            .collect();
        results.sort_by_key(|r| r.created_at);
        Ok(results)
    }

    async fn list_by_user_and_problem(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Submission>> {
        let mut matching: Vec<Submission> = self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id && s.problem_id == problem_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}

#[async_trait]
impl RankingRepository for MemoryDb {
    async fn update_flags(
        &self,
        contest_id: Uuid,
        user_id: Uuid,
        patch: LeaderboardPatch,
    ) -> AppResult<u64> {
        let mut rankings = self.rankings.lock().unwrap();
        match rankings.get_mut(&(contest_id, user_id)) {
            Some((hidden, disqualified)) => {
                *hidden = patch.hidden.unwrap_or(*hidden);
                *disqualified = patch.disqualified.unwrap_or(*disqualified);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl AdminRepository for MemoryDb {
    async fn is_admin(&self, user_id: Uuid) -> AppResult<bool> {
        Ok(self.admins.lock().unwrap().contains(&user_id))
    }
}
