//! Registration ledger service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::Storage,
    error::{AppError, AppResult, Entity},
    models::{Contest, RegistrationEntry, RegistrationStatus},
    utils::Clock,
};

/// Contest registrations
#[derive(Clone)]
pub struct RegistrationService {
    storage: Storage,
    clock: Arc<dyn Clock>,
}

impl RegistrationService {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Register a user for a contest.
    ///
    /// Duplicates are detected by the storage uniqueness constraint, never by a
    /// prior read, so concurrent calls for the same pair yield one success.
    pub async fn register(&self, contest_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let contest = self.open_contest(contest_id).await?;

        let profile = self
            .storage
            .users
            .find_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(Entity::User, user_id))?;

        if !contest.is_eligible(profile.current_year) {
            return Err(AppError::InvalidYear {
                contest_id,
                year: profile.current_year,
            });
        }

        let inserted = self
            .storage
            .registrations
            .register(contest_id, user_id, self.clock.now())
            .await?;

        if !inserted {
            tracing::debug!(contest_id = %contest_id, user_id = %user_id, "Duplicate registration");
            return Err(AppError::AlreadyRegistered {
                contest_id,
                user_id,
            });
        }

        tracing::info!(contest_id = %contest_id, user_id = %user_id, "User registered");
        Ok(())
    }

    /// Withdraw a registration while the registration window is open
    pub async fn unregister(&self, contest_id: Uuid, user_id: Uuid) -> AppResult<()> {
        self.open_contest(contest_id).await?;

        if !self
            .storage
            .registrations
            .unregister(contest_id, user_id)
            .await?
        {
            return Err(AppError::NotRegistered {
                contest_id,
                user_id,
            });
        }

        tracing::info!(contest_id = %contest_id, user_id = %user_id, "User unregistered");
        Ok(())
    }

    pub async fn is_registered(&self, contest_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        self.storage
            .registrations
            .is_registered(contest_id, user_id)
            .await
    }

    /// Registrants of a contest, earliest first
    pub async fn list_registrations(&self, contest_id: Uuid) -> AppResult<Vec<RegistrationEntry>> {
        if !self.storage.contests.exists(contest_id).await? {
            return Err(AppError::not_found(Entity::Contest, contest_id));
        }
        self.storage.registrations.list(contest_id).await
    }

    async fn open_contest(&self, contest_id: Uuid) -> AppResult<Contest> {
        let contest = self
            .storage
            .contests
            .find_by_id(contest_id)
            .await?
            .ok_or_else(|| AppError::not_found(Entity::Contest, contest_id))?;

        if contest.registration_status_at(self.clock.now()) != RegistrationStatus::Open {
            return Err(AppError::RegistrationClosed { contest_id });
        }

        Ok(contest)
    }
}
