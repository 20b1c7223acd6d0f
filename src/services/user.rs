use crate::{
    error::{AppError, Result},
    models::user::UserProfile,
    services::Database,
};
use std::sync::Arc;
use tracing::debug;

/// User store: resolves user ids to stored profiles.
#[derive(Clone)]
pub struct UserService {
    db: Arc<Database>,
}

impl UserService {
    pub async fn new(db: Arc<Database>) -> Result<Self> {
        Ok(Self { db })
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        debug!("Resolving profile for user: {}", user_id);
        self.db.get_by_id("user_profile", user_id).await
    }

    /// Insert a profile under the user's id. An existing profile is returned
    /// as-is rather than overwritten.
    pub async fn create_profile(&self, profile: &UserProfile) -> Result<UserProfile> {
        if let Some(existing) = self.get_profile(&profile.id).await? {
            return Ok(existing);
        }

        self.db
            .create_with_id("user_profile", &profile.id, serde_json::to_value(profile)?)
            .await?;

        self.db
            .get_by_id("user_profile", &profile.id)
            .await?
            .ok_or_else(|| AppError::internal("Failed to create user profile"))
    }
}
