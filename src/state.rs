//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{
    config::Config,
    db::Storage,
    services::{
        AdminService, ContestService, LeaderboardService, ProblemService, RegistrationService,
        SubmissionService,
    },
    storage::ContentStore,
    utils::{Clock, IdGenerator},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    contests: ContestService,
    registrations: RegistrationService,
    problems: ProblemService,
    submissions: SubmissionService,
    leaderboard: LeaderboardService,
    admins: AdminService,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Wire every service from the shared stores and collaborators
    pub fn new(
        storage: Storage,
        content: Arc<dyn ContentStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        config: Config,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                contests: ContestService::new(storage.clone(), clock.clone(), ids.clone()),
                registrations: RegistrationService::new(storage.clone(), clock.clone()),
                problems: ProblemService::new(storage.clone(), content.clone(), ids.clone()),
                submissions: SubmissionService::new(storage.clone(), content, clock, ids),
                leaderboard: LeaderboardService::new(storage.clone()),
                admins: AdminService::new(storage),
                config,
            }),
        }
    }

    pub fn contests(&self) -> &ContestService {
        &self.inner.contests
    }

    pub fn registrations(&self) -> &RegistrationService {
        &self.inner.registrations
    }

    pub fn problems(&self) -> &ProblemService {
        &self.inner.problems
    }

    pub fn submissions(&self) -> &SubmissionService {
        &self.inner.submissions
    }

    pub fn leaderboard(&self) -> &LeaderboardService {
        &self.inner.leaderboard
    }

    pub fn admins(&self) -> &AdminService {
        &self.inner.admins
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
