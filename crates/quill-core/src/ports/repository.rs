use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Category, Comment, CommentWithAuthor, Media, Post, PostDetail, PostSummary, Tag, User,
};
use crate::error::RepoError;
use crate::slug::SlugLookup;

/// One page of a paginated listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Update an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with lookup by credential and role management.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Role names assigned to a user.
    async fn roles_of(&self, user_id: Uuid) -> Result<Vec<String>, RepoError>;

    /// Attach a named role to a user. Unknown role names are an error.
    async fn assign_role(&self, user_id: Uuid, role: &str) -> Result<(), RepoError>;
}

/// Post repository: listings, projections, view counting and the
/// many-to-many association syncs.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> + SlugLookup {
    /// Published posts, newest first, optionally restricted to a category
    /// slug, in pages of `per_page`. Pages are 1-based.
    async fn list_published(
        &self,
        category_slug: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<Page<PostSummary>, RepoError>;

    /// Published posts flagged for the landing page, newest first.
    async fn featured(&self) -> Result<Vec<PostSummary>, RepoError>;

    /// Published posts by descending view count.
    async fn popular(&self, limit: u64) -> Result<Vec<PostSummary>, RepoError>;

    /// A random selection of published posts (the show page's "others").
    async fn random_published(&self, limit: u64) -> Result<Vec<PostSummary>, RepoError>;

    /// Full detail projection for the show and edit pages.
    async fn detail(&self, id: Uuid) -> Result<Option<PostDetail>, RepoError>;

    /// Atomically add one to the post's view counter.
    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError>;

    /// IDs of the categories currently attached to a post.
    async fn category_ids_of(&self, post_id: Uuid) -> Result<Vec<Uuid>, RepoError>;

    /// Names of the tags currently attached to a post.
    async fn tag_names_of(&self, post_id: Uuid) -> Result<Vec<String>, RepoError>;

    /// Replace the post's category set wholesale.
    async fn sync_categories(&self, post_id: Uuid, category_ids: &[Uuid]) -> Result<(), RepoError>;

    /// Replace the post's tag set wholesale.
    async fn sync_tags(&self, post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), RepoError>;

    /// Delete a post together with its comments, media and association
    /// rows. Returns NotFound if the post row does not exist.
    async fn delete_cascading(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// All categories, by name.
    async fn all(&self) -> Result<Vec<Category>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    /// Whether every given ID names an existing category.
    async fn all_exist(&self, ids: &[Uuid]) -> Result<bool, RepoError>;
}

/// Tag repository. Tag slugs share the unique-suffix policy with post
/// slugs, hence the SlugLookup bound.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> + SlugLookup {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments on a post, oldest first, with commenter names.
    async fn for_post(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>, RepoError>;
}

/// Media repository.
#[async_trait]
pub trait MediaRepository: BaseRepository<Media, Uuid> {
    /// The first media row attached to a post, if any.
    async fn first_for_post(&self, post_id: Uuid) -> Result<Option<Media>, RepoError>;
}
