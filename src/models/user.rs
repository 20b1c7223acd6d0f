use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored user profile. Comments denormalize `name` and `avatar` from here
/// at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}
