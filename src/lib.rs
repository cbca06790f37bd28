//! Horserace - Horse speed comparison from historical finish times
//!
//! This library provides:
//! - Race result loading from CSV into a read-only record store
//! - Value-weighted empirical sampling of finish-time speeds
//! - Head-to-head mean speed comparison with a deterministic tie-break
//! - An actix-web API over the comparison service (`api` feature)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use horserace::core::ComparisonService;
//! use horserace::data::load_races;
//!
//! let store = load_races("races.csv").unwrap();
//! let service = ComparisonService::with_defaults(Arc::new(store));
//!
//! let result = service.compare(1, 2, 1000, Some(7)).unwrap();
//! println!("Faster horse: rank {}", result.faster.rank);
//! ```

pub mod core;
pub mod data;
pub mod models;

// API-specific modules (only available with api feature)
#[cfg(feature = "api")]
pub mod error;
#[cfg(feature = "api")]
pub mod handlers;

// Re-export commonly used types
pub use crate::core::{ComparisonResult, ComparisonService, HorseProfile, SpeedEstimator};
pub use data::{load_races, RaceRecord, RecordStore};
pub use models::{CompareQuery, CompareResponse, HealthResponse};

/// Application state shared across handlers
#[cfg(feature = "api")]
pub struct AppState {
    pub service: ComparisonService,
}
