//! Database repositories
//!
//! One trait per entity with a Postgres implementation. Services receive the
//! repositories bundled in a [`Storage`] façade so tests can swap any of them.

pub mod admin_repo;
pub mod contest_repo;
pub mod problem_repo;
pub mod ranking_repo;
pub mod registration_repo;
pub mod submission_repo;
pub mod user_repo;

use std::sync::Arc;

use sqlx::PgPool;

pub use admin_repo::{AdminRepository, PgAdminRepository};
pub use contest_repo::{ContestRepository, PgContestRepository};
pub use problem_repo::{PgProblemRepository, ProblemRepository};
pub use ranking_repo::{PgRankingRepository, RankingRepository};
pub use registration_repo::{PgRegistrationRepository, RegistrationRepository};
pub use submission_repo::{PgSubmissionRepository, SubmissionRepository};
pub use user_repo::{PgUserRepository, UserRepository};

#[cfg(test)]
pub use admin_repo::MockAdminRepository;
#[cfg(test)]
pub use contest_repo::MockContestRepository;
#[cfg(test)]
pub use problem_repo::MockProblemRepository;
#[cfg(test)]
pub use ranking_repo::MockRankingRepository;
#[cfg(test)]
pub use registration_repo::MockRegistrationRepository;
#[cfg(test)]
pub use submission_repo::MockSubmissionRepository;
#[cfg(test)]
pub use user_repo::MockUserRepository;

/// Every repository the services use
#[derive(Clone)]
pub struct Storage {
    pub contests: Arc<dyn ContestRepository>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub problems: Arc<dyn ProblemRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub rankings: Arc<dyn RankingRepository>,
    pub admins: Arc<dyn AdminRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Storage {
    /// All repositories backed by one Postgres pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            contests: Arc::new(PgContestRepository::new(pool.clone())),
            registrations: Arc::new(PgRegistrationRepository::new(pool.clone())),
            problems: Arc::new(PgProblemRepository::new(pool.clone())),
            submissions: Arc::new(PgSubmissionRepository::new(pool.clone())),
            rankings: Arc::new(PgRankingRepository::new(pool.clone())),
            admins: Arc::new(PgAdminRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool)),
        }
    }
}

#[cfg(test)]
impl Storage {
    /// Storage made of mocks without expectations; override fields per test
    pub fn mocked() -> Self {
        Self {
            contests: Arc::new(MockContestRepository::new()),
            registrations: Arc::new(MockRegistrationRepository::new()),
            problems: Arc::new(MockProblemRepository::new()),
            submissions: Arc::new(MockSubmissionRepository::new()),
            rankings: Arc::new(MockRankingRepository::new()),
            admins: Arc::new(MockAdminRepository::new()),
            users: Arc::new(MockUserRepository::new()),
        }
    }
}
