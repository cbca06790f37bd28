use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::warn;

use crate::error::{parse_rank, AppError};
use crate::AppState;

/// List every loaded horse with its fastest and slowest finish
pub async fn list_horses(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(state.service.profiles())
}

/// Profile of the horse at a given rank
pub async fn horse_profile(
    state: web::Data<Arc<AppState>>,
    rank: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let rank = parse_rank("rank", Some(rank.as_str()))?;

    let profile = state.service.profile(rank).map_err(|e| {
        warn!("Profile lookup for rank {} failed: {}", rank, e);
        AppError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(profile))
}
