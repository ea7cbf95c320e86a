//! Category listing handler.

use actix_web::{HttpResponse, web};

use crate::handlers::convert::category_response;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/categories
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories: Vec<_> = state
        .categories
        .all()
        .await?
        .into_iter()
        .map(category_response)
        .collect();

    Ok(HttpResponse::Ok().json(categories))
}
