//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod contest;
pub mod leaderboard;
pub mod problem;
pub mod registration;
pub mod submission;
pub mod user;

pub use contest::*;
pub use leaderboard::*;
pub use problem::*;
pub use registration::*;
pub use submission::*;
pub use user::*;
