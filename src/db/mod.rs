//! Database module
//!
//! This module handles database connections, migrations, the integer-list
//! column codec and repositories.

pub mod codec;
pub mod connection;
pub mod repositories;

use sqlx::PgPool;

pub use connection::*;
pub use repositories::Storage;

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
