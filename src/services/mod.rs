//! Business logic services

pub mod admin_service;
pub mod contest_service;
pub mod leaderboard_service;
pub mod problem_service;
pub mod registration_service;
pub mod submission_service;

#[cfg(test)]
pub(crate) mod fakes;

pub use admin_service::AdminService;
pub use contest_service::ContestService;
pub use leaderboard_service::LeaderboardService;
pub use problem_service::ProblemService;
pub use registration_service::RegistrationService;
pub use submission_service::SubmissionService;
