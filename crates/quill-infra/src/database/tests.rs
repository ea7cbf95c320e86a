use std::collections::BTreeMap;

use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

use quill_core::domain::{Post, PostStatus};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};
use quill_core::slug::SlugLookup;

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;

fn post_row(title: &str, slug: &str) -> post::Model {
    let now = chrono::Utc::now();
    post::Model {
        id: uuid::Uuid::new_v4(),
        user_id: uuid::Uuid::new_v4(),
        title: title.to_owned(),
        slug: slug.to_owned(),
        content: "Content".to_owned(),
        status: "P".to_owned(),
        featured_image_url: None,
        publication_date: Some(now.into()),
        last_modified_date: now.into(),
        views_count: 7,
        featured: false,
    }
}

#[tokio::test]
async fn find_post_by_id_maps_the_row() {
    let row = post_row("Test Post", "test-post");
    let post_id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let found = result.unwrap();
    assert_eq!(found.id, post_id);
    assert_eq!(found.title, "Test Post");
    assert_eq!(found.status, PostStatus::Published);
    assert_eq!(found.views_count, 7);
}

#[tokio::test]
async fn slug_exists_reflects_the_count() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![
            vec![BTreeMap::from([("num_items", Value::BigInt(Some(1)))])],
            vec![BTreeMap::from([("num_items", Value::BigInt(Some(0)))])],
        ])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.slug_exists("taken-slug").await.unwrap());
    assert!(!repo.slug_exists("free-slug").await.unwrap());
}

#[tokio::test]
async fn increment_views_on_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo.increment_views(uuid::Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn delete_cascading_reports_missing_post() {
    // Four child delete_many calls succeed, the post row itself is gone
    let child_delete = MockExecResult {
        last_insert_id: 0,
        rows_affected: 2,
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![
            child_delete.clone(),
            child_delete.clone(),
            child_delete.clone(),
            child_delete,
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo.delete_cascading(uuid::Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}
