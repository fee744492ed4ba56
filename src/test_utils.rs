//! Test utilities with lazy testcontainers support
//!
//! The Postgres container is started on first use and shared across tests.


#[cfg(test)]
pub mod fixtures {
    use chrono::{DateTime, Duration, Utc};
    use sqlx::PgPool;
    use uuid::Uuid;

    use super::containers;
    use crate::db::codec::encode_csv;

    /// Connect to the shared container and bring the schema up to date
    pub async fn test_pool() -> PgPool {
        let pool = PgPool::connect(&containers::postgres_url().await)
            .await
            .expect("Failed to connect to test database");

        crate::db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    /// Insert a user profile with a unique email
    pub async fn insert_user(pool: &PgPool, current_year: i32) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, usn, department, current_year)
            VALUES ($1, $2, $3, $4, 'CSE', $5)
            "#,
        )
        .bind(id)
        .bind(format!("user-{id}"))
        .bind(format!("{id}@example.test"))
        .bind(format!("USN{}", id.simple()))
        .bind(current_year)
        .execute(pool)
        .await
        .expect("Failed to insert user");
        id
    }

    /// Insert a contest whose registration is open and which runs an hour from `now`
    pub async fn insert_contest(pool: &PgPool, now: DateTime<Utc>, eligible_to: &[i32]) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO contests (
                id, name, description, registration_start_time, registration_end_time,
                start_time, end_time, eligible_to
            )
            VALUES ($1, 'fixture', '', $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(now - Duration::hours(1))
        .bind(now + Duration::minutes(30))
        .bind(now + Duration::hours(1))
        .bind(now + Duration::hours(3))
        .bind(encode_csv(eligible_to))
        .execute(pool)
        .await
        .expect("Failed to insert contest");
        id
    }
}
