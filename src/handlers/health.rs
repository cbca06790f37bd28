use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::models::HealthResponse;
use crate::AppState;

/// Health check endpoint
pub async fn health_check(state: web::Data<Arc<AppState>>) -> impl Responder {
    let store = state.service.store();
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        horses_loaded: store.len(),
        races_loaded: store.total_races(),
    };

    HttpResponse::Ok().json(response)
}
