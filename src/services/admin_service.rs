//! Admin lookup

use uuid::Uuid;

use crate::{db::Storage, error::AppResult};

#[derive(Clone)]
pub struct AdminService {
    storage: Storage,
}

impl AdminService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Whether the user is listed in the `admin` table
    pub async fn is_admin(&self, user_id: Uuid) -> AppResult<bool> {
        self.storage.admins.is_admin(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::MockAdminRepository;
    use mockall::predicate::eq;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_is_admin_delegates_to_table() {
        let admin = Uuid::new_v4();
        let mut admins = MockAdminRepository::new();
        admins
            .expect_is_admin()
            .with(eq(admin))
            .returning(|_| Ok(true));
        admins.expect_is_admin().returning(|_| Ok(false));

        let mut storage = Storage::mocked();
        storage.admins = Arc::new(admins);
        let service = AdminService::new(storage);

        assert!(service.is_admin(admin).await.unwrap());
        assert!(!service.is_admin(Uuid::new_v4()).await.unwrap());
    }
}
