//! Schema migrations for the Quill blog backend.

pub use sea_orm_migration::prelude::*;

mod m20260115_000001_create_users;
mod m20260115_000002_create_posts;
mod m20260115_000003_create_taxonomy;
mod m20260115_000004_create_media_and_comments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260115_000001_create_users::Migration),
            Box::new(m20260115_000002_create_posts::Migration),
            Box::new(m20260115_000003_create_taxonomy::Migration),
            Box::new(m20260115_000004_create_media_and_comments::Migration),
        ]
    }
}
