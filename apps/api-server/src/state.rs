//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::image::ImagePolicy;
use quill_core::ports::{
    Cache, CategoryRepository, CommentRepository, MediaRepository, PostRepository, TagRepository,
    UserRepository,
};
use quill_infra::cache::InMemoryCache;
use quill_infra::database::{
    DatabaseConfig, DatabaseHandle, DbErr, PostgresCategoryRepository, PostgresCommentRepository,
    PostgresMediaRepository, PostgresPostRepository, PostgresTagRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub media: Arc<dyn MediaRepository>,
    pub cache: Arc<dyn Cache>,
    pub image_policy: ImagePolicy,
}

impl AppState {
    /// Build the application state over one pooled connection.
    pub async fn new(db_config: &DatabaseConfig) -> Result<Self, DbErr> {
        let handle = DatabaseHandle::init(db_config).await?;
        let conn = handle.conn;

        tracing::info!("Application state initialized");

        Ok(Self {
            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
            users: Arc::new(PostgresUserRepository::new(conn.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(conn.clone())),
            tags: Arc::new(PostgresTagRepository::new(conn.clone())),
            comments: Arc::new(PostgresCommentRepository::new(conn.clone())),
            media: Arc::new(PostgresMediaRepository::new(conn)),
            cache: Arc::new(InMemoryCache::new()),
            image_policy: ImagePolicy::default(),
        })
    }
}
