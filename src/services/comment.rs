use crate::{
    error::{AppError, Result},
    models::comment::{Comment, CreateCommentRequest},
    services::{Database, UserService},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct CommentService {
    db: Arc<Database>,
    user_service: UserService,
}

impl CommentService {
    pub async fn new(db: Arc<Database>, user_service: UserService) -> Result<Self> {
        Ok(Self { db, user_service })
    }

    /// Every stored comment, in store-native order.
    pub async fn list_comments(&self) -> Result<Vec<Comment>> {
        self.db.select_all("comment").await
    }

    pub async fn get_comment(&self, comment_id: &str) -> Result<Option<Comment>> {
        self.db.get_by_id("comment", comment_id).await
    }

    pub async fn create_comment(
        &self,
        user_id: &str,
        request: CreateCommentRequest,
    ) -> Result<Comment> {
        debug!("Creating comment on post: {}", request.post);

        request.validate().map_err(AppError::ValidatorError)?;

        // Snapshot the author's name and avatar into the comment. A missing
        // profile behind a valid token is a data-integrity fault, not a
        // client error.
        let profile = self
            .user_service
            .get_profile(user_id)
            .await?
            .ok_or_else(|| {
                error!("No profile found for authenticated user: {}", user_id);
                AppError::internal("Authenticated user has no profile")
            })?;

        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            text: request.text,
            user: user_id.to_string(),
            post: request.post,
            parent_comment: request.parent_comment,
            name: profile.name,
            avatar: profile.avatar,
            created_at: Utc::now(),
        };

        self.db
            .create_with_id("comment", &comment.id, serde_json::to_value(&comment)?)
            .await?;

        self.db
            .get_by_id("comment", &comment.id)
            .await?
            .ok_or_else(|| AppError::internal("Failed to create comment"))
    }
}
