use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Media entity - an upload record attached to a post. The application
/// stores URLs only; binary storage is an external concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub id: Uuid,
    pub post_id: Uuid,
    pub url: Option<String>,
    pub file_name: String,
    pub file_type: String,
    pub upload_date: DateTime<Utc>,
    pub description: Option<String>,
}

impl Media {
    /// Create the media record written alongside a new post.
    pub fn for_post(post_id: Uuid, url: Option<String>, file_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            url,
            file_name,
            file_type: ".jpg".to_owned(),
            upload_date: Utc::now(),
            description: None,
        }
    }
}
