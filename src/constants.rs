//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default per-request deadline in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// CONTENT STORE DEFAULTS
// =============================================================================

/// Default content store backend
pub const DEFAULT_CONTENT_STORE_BACKEND: &str = "filesystem";

/// Default root directory of the filesystem content store
pub const DEFAULT_CONTENT_STORE_PATH: &str = "/data/content";

/// Default region of the S3 content store
pub const DEFAULT_S3_REGION: &str = "us-east-1";

// =============================================================================
// PAGINATION
// =============================================================================

/// Contests returned per listing page
pub const CONTESTS_PAGE_SIZE: i64 = 20;

/// Submissions returned per listing page
pub const SUBMISSIONS_PAGE_SIZE: i64 = 20;

// =============================================================================
// VALIDATION LIMITS
// =============================================================================

/// Maximum contest name length
pub const MAX_CONTEST_NAME_LENGTH: u64 = 200;

/// Maximum problem name length
pub const MAX_PROBLEM_NAME_LENGTH: u64 = 200;

/// Maximum language identifier length
pub const MAX_LANGUAGE_LENGTH: u64 = 32;

/// Lowest eligible cohort (academic year)
pub const MIN_COHORT: i32 = 1;

/// Highest eligible cohort (academic year)
pub const MAX_COHORT: i32 = 3;

// =============================================================================
// HTTP HEADERS
// =============================================================================

/// Header carrying the caller identity resolved by the upstream gateway
pub const USER_ID_HEADER: &str = "x-user-id";
