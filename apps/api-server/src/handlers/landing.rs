//! Landing page handler: featured, latest and popular posts plus the
//! cached category list.

use std::time::Duration;

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_shared::dto::{CategoryResponse, LandingResponse};

use crate::handlers::convert::{category_response, page_response, summary_response};
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

const POPULAR_LIMIT: u64 = 10;
const LATEST_PER_PAGE: u64 = 10;

const CATEGORY_CACHE_KEY: &str = "all_categories";
const CATEGORY_CACHE_TTL: Duration = Duration::from_secs(60 * 60 * 24);

#[derive(Debug, Deserialize)]
pub struct LandingQuery {
    pub page: Option<u64>,
}

/// GET /api/landing
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<LandingQuery>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let featured = state.posts.featured().await?;
    let latest = state
        .posts
        .list_published(None, query.page.unwrap_or(1), LATEST_PER_PAGE)
        .await?;
    let popular = state.posts.popular(POPULAR_LIMIT).await?;
    let categories = cached_categories(&state).await?;

    Ok(HttpResponse::Ok().json(LandingResponse {
        featured: featured.into_iter().map(summary_response).collect(),
        latest: page_response(latest, summary_response),
        popular: popular.into_iter().map(summary_response).collect(),
        categories,
        logged_in: identity.0.is_some(),
    }))
}

/// The category list changes rarely; keep it cached for a day.
async fn cached_categories(state: &AppState) -> AppResult<Vec<CategoryResponse>> {
    if let Some(raw) = state.cache.get(CATEGORY_CACHE_KEY).await {
        if let Ok(categories) = serde_json::from_str(&raw) {
            return Ok(categories);
        }
        tracing::warn!("Cached category list is unreadable; refreshing");
    }

    let categories: Vec<CategoryResponse> = state
        .categories
        .all()
        .await?
        .into_iter()
        .map(category_response)
        .collect();

    match serde_json::to_string(&categories) {
        Ok(raw) => {
            if let Err(e) = state
                .cache
                .set(CATEGORY_CACHE_KEY, &raw, Some(CATEGORY_CACHE_TTL))
                .await
            {
                tracing::warn!("Failed to cache category list: {e}");
            }
        }
        Err(e) => tracing::warn!("Failed to serialize category list for cache: {e}"),
    }

    Ok(categories)
}
