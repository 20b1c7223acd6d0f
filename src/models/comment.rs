use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A comment attached to a post. `name` and `avatar` are a snapshot of the
/// author's profile taken at creation time; they are not kept in sync with
/// later profile edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub user: String,
    pub post: String,
    pub parent_comment: Option<String>,
    pub name: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    // Missing fields validate as empty rather than failing deserialization.
    #[serde(default)]
    #[validate(length(min = 1, message = "Comment text is required"))]
    pub text: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Post id is required"))]
    pub post: String,

    pub parent_comment: Option<String>,
}
