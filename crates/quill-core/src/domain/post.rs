use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Category, Media, Tag};

/// Publication status of a post. Stored in the database as a one-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    /// One-letter database code for this status.
    pub fn code(&self) -> &'static str {
        match self {
            PostStatus::Draft => "D",
            PostStatus::Published => "P",
        }
    }

    /// Parse the one-letter database code. Unknown codes fall back to Draft.
    pub fn from_code(code: &str) -> Self {
        match code {
            "P" => PostStatus::Published,
            _ => PostStatus::Draft,
        }
    }
}

/// Post entity - a blog post authored by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: PostStatus,
    pub featured_image_url: Option<String>,
    pub publication_date: Option<DateTime<Utc>>,
    pub last_modified_date: DateTime<Utc>,
    pub views_count: i64,
    pub featured: bool,
}

impl Post {
    /// Create a new draft post. The slug must already be unique for the
    /// posts table (see [`crate::slug::unique_slug`]).
    pub fn new(user_id: Uuid, title: String, slug: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            slug,
            content,
            status: PostStatus::Draft,
            featured_image_url: None,
            publication_date: None,
            last_modified_date: Utc::now(),
            views_count: 0,
            featured: false,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// List-view projection of a post: the row plus the eager-loaded author
/// name, categories and first media URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub post: Post,
    pub author_name: String,
    pub categories: Vec<Category>,
    pub media_url: Option<String>,
}

/// Detail-view projection: everything the show page needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub post: Post,
    pub author_name: String,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub media: Vec<Media>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_starts_as_unpublished_draft() {
        let post = Post::new(
            Uuid::new_v4(),
            "Hello".to_owned(),
            "hello".to_owned(),
            "body".to_owned(),
        );
        assert_eq!(post.status, PostStatus::Draft);
        assert!(!post.is_published());
        assert_eq!(post.views_count, 0);
        assert!(post.publication_date.is_none());
    }

    #[test]
    fn status_codes_round_trip() {
        assert_eq!(PostStatus::from_code("P"), PostStatus::Published);
        assert_eq!(PostStatus::from_code("D"), PostStatus::Draft);
        assert_eq!(
            PostStatus::from_code(PostStatus::Published.code()),
            PostStatus::Published
        );
    }
}
