use actix_web::{middleware, web, App, HttpServer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use horserace::core::{ComparisonService, SpeedEstimator, DEFAULT_SAMPLE_COUNT, SPEED_CONSTANT};
use horserace::data::load_races;
use horserace::{handlers, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("{}:{}", host, port);

    let csv_path = std::env::var("RACES_CSV")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("races.csv"));

    let sample_count = match std::env::var("SAMPLE_COUNT") {
        Ok(raw) => raw.parse::<usize>().ok().filter(|&n| n > 0).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("SAMPLE_COUNT must be a positive integer, got '{}'", raw),
            )
        })?,
        Err(_) => DEFAULT_SAMPLE_COUNT,
    };

    // Refuse to serve partial data
    info!("Loading race results from {:?}", csv_path);
    let store = load_races(&csv_path).map_err(|e| {
        error!("Failed to load race results: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })?;

    info!(
        "Loaded {} horses ({} races), sampling {} draws per estimate",
        store.len(),
        store.total_races(),
        sample_count
    );

    let service = ComparisonService::new(
        Arc::new(store),
        SpeedEstimator::new(SPEED_CONSTANT),
        sample_count,
    );
    let app_state = Arc::new(AppState { service });

    info!("Starting Horserace API server at http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .configure(handlers::configure)
    })
    .bind(&addr)?
    .run()
    .await
}
