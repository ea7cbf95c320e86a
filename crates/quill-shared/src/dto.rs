//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---- Auth ----

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
}

// ---- Posts ----

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    #[serde(default)]
    pub categories: Vec<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to update a post. Content and image are optional; omitted
/// associations mean "none".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub categories: Vec<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A post row as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: String,
    pub featured_image_url: Option<String>,
    pub publication_date: Option<DateTime<Utc>>,
    pub last_modified_date: DateTime<Utc>,
    pub views_count: i64,
    pub featured: bool,
}

/// A post in a listing, with the author name, categories and lead image
/// the index and landing pages render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummaryResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub author_name: String,
    pub publication_date: Option<DateTime<Utc>>,
    pub views_count: i64,
    pub featured: bool,
    pub categories: Vec<CategoryResponse>,
    pub media_url: Option<String>,
}

/// Full post detail for the show and edit pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub author_name: String,
    pub categories: Vec<CategoryResponse>,
    pub tags: Vec<TagResponse>,
    pub media: Vec<MediaResponse>,
}

/// The show page: the post, its comments, and a few other reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowPostResponse {
    pub post: PostDetailResponse,
    pub comments: Vec<CommentResponse>,
    pub others: Vec<PostSummaryResponse>,
}

/// Form-support payload for the edit page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditPostResponse {
    pub post: PostDetailResponse,
    pub categories: Vec<CategoryResponse>,
}

/// Form-support payload for the create page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFormResponse {
    pub categories: Vec<CategoryResponse>,
}

// ---- Taxonomy ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

// ---- Media ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaResponse {
    pub id: Uuid,
    pub url: Option<String>,
    pub file_name: String,
    pub file_type: String,
    pub upload_date: DateTime<Utc>,
    pub description: Option<String>,
}

// ---- Comments ----

/// Request to post a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// ---- Listings ----

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

/// The landing page payload: featured, latest and popular posts plus the
/// category list and whether the caller is logged in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingResponse {
    pub featured: Vec<PostSummaryResponse>,
    pub latest: PageResponse<PostSummaryResponse>,
    pub popular: Vec<PostSummaryResponse>,
    pub categories: Vec<CategoryResponse>,
    pub logged_in: bool,
}
