//! HTTP request handlers

pub mod compare;
pub mod health;
pub mod horses;

use actix_web::web;

/// Register all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/compare", web::get().to(compare::compare_horses))
        .route("/horses", web::get().to(horses::list_horses))
        .route("/horses/{rank}", web::get().to(horses::horse_profile));
}
