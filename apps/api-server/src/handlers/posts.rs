//! Post CRUD handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use quill_core::change::{PostChanges, PostUpdate};
use quill_core::domain::{Media, Post, Tag};
use quill_core::slug::{slugify, unique_slug};
use quill_shared::ApiResponse;
use quill_shared::dto::{
    CreateFormResponse, CreatePostRequest, EditPostResponse, ShowPostResponse, UpdatePostRequest,
};

use crate::handlers::convert::{
    category_response, comment_response, detail_response, page_response, post_response,
    summary_response,
};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const PER_PAGE: u64 = 10;
const OTHERS_LIMIT: u64 = 3;
const TITLE_MAX_LEN: usize = 255;

/// Placeholder image attached to new posts until the author picks one.
const DEFAULT_FEATURED_IMAGE: &str = "https://picsum.photos/200/300";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub page: Option<u64>,
}

/// Whether this identity may edit or delete the post: its author, or an
/// admin.
fn can_modify(identity: &Identity, post: &Post) -> bool {
    post.user_id == identity.user_id || identity.is_admin()
}

fn validate_title(title: &str, errors: &mut Vec<String>) {
    if title.trim().is_empty() {
        errors.push("title is required".to_string());
    } else if title.chars().count() > TITLE_MAX_LEN {
        errors.push(format!("title must be at most {TITLE_MAX_LEN} characters"));
    }
}

async fn validate_categories(state: &AppState, ids: &[Uuid]) -> AppResult<()> {
    if !state.categories.all_exist(ids).await? {
        return Err(AppError::Validation(vec![
            "categories contains an unknown id".to_string(),
        ]));
    }
    Ok(())
}

/// First-or-create every named tag and return the resulting IDs. New tags
/// get a uniquely suffixed slug of their own.
async fn ensure_tags(state: &AppState, names: &[String]) -> AppResult<Vec<Uuid>> {
    let mut ids = Vec::with_capacity(names.len());

    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let tag = match state.tags.find_by_name(name).await? {
            Some(tag) => tag,
            None => {
                tracing::debug!(tag = %name, "Creating new tag");
                let slug = unique_slug(&*state.tags, &slugify(name)).await?;
                state.tags.insert(Tag::new(name.to_owned(), slug)).await?
            }
        };
        ids.push(tag.id);
    }

    Ok(ids)
}

/// GET /api/posts?category=<slug>&page=<n>
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .posts
        .list_published(query.category.as_deref(), query.page.unwrap_or(1), PER_PAGE)
        .await?;

    Ok(HttpResponse::Ok().json(page_response(page, summary_response)))
}

/// GET /api/posts/create - form-support payload.
pub async fn create(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    tracing::info!("Showing post creation form data");

    let categories = state
        .categories
        .all()
        .await?
        .into_iter()
        .map(category_response)
        .collect();

    Ok(HttpResponse::Ok().json(CreateFormResponse { categories }))
}

/// POST /api/posts
pub async fn store(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    tracing::info!(user_id = %identity.user_id, title = %req.title, "Creating post");

    let mut errors = Vec::new();
    validate_title(&req.title, &mut errors);
    if req.content.trim().is_empty() {
        errors.push("content is required".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    validate_categories(&state, &req.categories).await?;

    // Slug must be unique across all posts
    let slug = unique_slug(&*state.posts, &slugify(&req.title)).await?;

    let mut post = Post::new(identity.user_id, req.title, slug, req.content);
    post.featured_image_url = Some(DEFAULT_FEATURED_IMAGE.to_owned());

    // A failed save is an error, never a silent success
    let post = state.posts.insert(post).await?;
    tracing::info!(post_id = %post.id, slug = %post.slug, "Post saved");

    if !req.categories.is_empty() {
        state.posts.sync_categories(post.id, &req.categories).await?;
    }
    if !req.tags.is_empty() {
        let tag_ids = ensure_tags(&state, &req.tags).await?;
        state.posts.sync_tags(post.id, &tag_ids).await?;
    }

    let media = Media::for_post(post.id, req.image, format!("{}.jpg", post.slug));
    state.media.insert(media).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        post_response(post),
        "Post stored successfully",
    )))
}

/// GET /api/posts/{id} - increments the view counter exactly once.
pub async fn show(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    tracing::info!(post_id = %id, "Showing post");

    state.posts.increment_views(id).await.map_err(|e| match e {
        quill_core::error::RepoError::NotFound => {
            AppError::NotFound(format!("Post {id} not found"))
        }
        other => other.into(),
    })?;

    let detail = state
        .posts
        .detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;
    let comments = state.comments.for_post(id).await?;
    let others = state.posts.random_published(OTHERS_LIMIT).await?;

    Ok(HttpResponse::Ok().json(ShowPostResponse {
        post: detail_response(detail),
        comments: comments.into_iter().map(comment_response).collect(),
        others: others.into_iter().map(summary_response).collect(),
    }))
}

/// GET /api/posts/{id}/edit - the post plus everything the edit form needs.
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let detail = state
        .posts
        .detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    if !can_modify(&identity, &detail.post) {
        return Err(AppError::Forbidden);
    }

    let categories = state
        .categories
        .all()
        .await?
        .into_iter()
        .map(category_response)
        .collect();

    Ok(HttpResponse::Ok().json(EditPostResponse {
        post: detail_response(detail),
        categories,
    }))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    tracing::info!(post_id = %id, user_id = %identity.user_id, "Updating post");

    let mut errors = Vec::new();
    validate_title(&req.title, &mut errors);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    if !can_modify(&identity, &post) {
        return Err(AppError::Forbidden);
    }
    validate_categories(&state, &req.categories).await?;

    // Any previously unseen tag names become tags before diffing
    let tag_ids = ensure_tags(&state, &req.tags).await?;

    let current_categories = state.posts.category_ids_of(id).await?;
    let current_tags = state.posts.tag_names_of(id).await?;

    let incoming = PostUpdate {
        title: req.title,
        content: req.content,
        image: req.image,
        category_ids: req.categories,
        tag_names: req.tags,
    };
    let changes = PostChanges::detect(
        &post,
        &current_categories,
        &current_tags,
        &incoming,
        &state.image_policy,
    );
    tracing::debug!(?changes, "Change detection finished");

    if !changes.any() {
        tracing::info!(post_id = %id, "Nothing changed; skipping save");
        return Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
            post_response(post),
            "Nothing to update",
        )));
    }

    if changes.categories {
        state
            .posts
            .sync_categories(id, &incoming.category_ids)
            .await?;
    }
    if changes.tags {
        state.posts.sync_tags(id, &tag_ids).await?;
    }

    let mut post = post;
    if changes.title || changes.content || changes.image {
        if changes.title {
            post.title = incoming.title.clone();
        }
        if changes.content {
            post.content = incoming.content_or_empty().to_owned();
        }
        if changes.image {
            post.featured_image_url = incoming.image.clone().filter(|url| !url.is_empty());

            // Keep the attached media record in step with the new URL
            if let Some(mut media) = state.media.first_for_post(id).await? {
                media.url = post.featured_image_url.clone();
                media.upload_date = Utc::now();
                state.media.update(media).await?;
            }
        }
        post.last_modified_date = Utc::now();
        post = state.posts.update(post).await?;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        post_response(post),
        "Successfully saved post",
    )))
}

/// DELETE /api/posts/{id}
pub async fn destroy(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    tracing::info!(post_id = %id, user_id = %identity.user_id, "Deleting post");

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    if !can_modify(&identity, &post) {
        return Err(AppError::Forbidden);
    }

    state.posts.delete_cascading(id).await?;
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Post deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::{ROLE_ADMIN, ROLE_AUTHOR};

    fn identity(user_id: Uuid, roles: &[&str]) -> Identity {
        Identity {
            user_id,
            email: "user@example.com".to_owned(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn post_by(user_id: Uuid) -> Post {
        Post::new(
            user_id,
            "Title".to_owned(),
            "title".to_owned(),
            "content".to_owned(),
        )
    }

    #[test]
    fn owner_may_modify() {
        let owner = Uuid::new_v4();
        assert!(can_modify(&identity(owner, &[ROLE_AUTHOR]), &post_by(owner)));
    }

    #[test]
    fn admin_may_modify_any_post() {
        let admin = identity(Uuid::new_v4(), &[ROLE_ADMIN]);
        assert!(can_modify(&admin, &post_by(Uuid::new_v4())));
    }

    #[test]
    fn stranger_may_not_modify() {
        let stranger = identity(Uuid::new_v4(), &[ROLE_AUTHOR]);
        assert!(!can_modify(&stranger, &post_by(Uuid::new_v4())));
    }
}
