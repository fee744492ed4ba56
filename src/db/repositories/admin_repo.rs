//! Admin repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;

/// Membership of the `admin` table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn is_admin(&self, user_id: Uuid) -> AppResult<bool>;
}

/// Postgres-backed admin lookup
#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    async fn is_admin(&self, user_id: Uuid) -> AppResult<bool> {
        let is_admin: bool =
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM admin WHERE user_id = $1)"#)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_is_admin() {
        let pool = fixtures::test_pool().await;
        let admin = fixtures::insert_user(&pool, 3).await;
        let student = fixtures::insert_user(&pool, 1).await;
        sqlx::query("INSERT INTO admin (user_id) VALUES ($1)")
            .bind(admin)
            .execute(&pool)
            .await
            .unwrap();
        let repo = PgAdminRepository::new(pool);

        assert!(repo.is_admin(admin).await.unwrap());
        assert!(!repo.is_admin(student).await.unwrap());
    }
}
