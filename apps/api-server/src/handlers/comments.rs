//! Comment handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Comment, CommentWithAuthor};
use quill_shared::ApiResponse;
use quill_shared::dto::CreateCommentRequest;

use crate::handlers::convert::comment_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts/{id}/comments
pub async fn store(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();

    if req.content.trim().is_empty() {
        return Err(AppError::Validation(vec!["content is required".to_string()]));
    }

    // The post must still exist
    state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

    let comment = Comment::new(post_id, identity.user_id, req.content);
    let comment = state.comments.insert(comment).await?;
    tracing::info!(post_id = %post_id, comment_id = %comment.id, "Comment stored");

    let author_name = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .map(|u| u.name)
        .unwrap_or_default();

    Ok(HttpResponse::Created().json(ApiResponse::ok(comment_response(CommentWithAuthor {
        comment,
        author_name,
    }))))
}
