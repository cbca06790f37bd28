use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::core::CompareError;
use crate::data::StoreError;
use crate::models::ErrorResponse;

/// Largest sample count accepted from a request
pub const MAX_SAMPLE_COUNT: usize = 100_000;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Invalid request parameters
    ValidationError(String),
    /// Requested horse does not exist
    NotFound(String),
    /// Estimation failed on stored data
    EstimationError(String),
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::EstimationError(msg) => write!(f, "Estimation error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::EstimationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AppError::ValidationError(msg) => ("validation_error", msg.clone()),
            AppError::NotFound(msg) => ("not_found", msg.clone()),
            AppError::EstimationError(msg) => ("estimation_error", msg.clone()),
            AppError::InternalError(msg) => ("internal_error", msg.clone()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error_code.to_string(),
            message,
        })
    }
}

impl From<CompareError> for AppError {
    fn from(err: CompareError) -> Self {
        match &err {
            CompareError::Store(StoreError::RankNotFound { .. }) => {
                AppError::NotFound(err.to_string())
            }
            CompareError::Store(e) => AppError::InternalError(e.to_string()),
            CompareError::Estimate(e) => AppError::EstimationError(e.to_string()),
        }
    }
}

/// Validation functions
pub fn parse_rank(name: &str, raw: Option<&str>) -> Result<usize, AppError> {
    let raw = raw.ok_or_else(|| AppError::ValidationError(format!("Missing {} parameter", name)))?;

    match raw.trim().parse::<usize>() {
        Ok(rank) if rank >= 1 => Ok(rank),
        _ => Err(AppError::ValidationError(format!(
            "Invalid {} parameter: expected a positive integer rank, got '{}'",
            name, raw
        ))),
    }
}

pub fn parse_sample_count(raw: Option<&str>, default: usize) -> Result<usize, AppError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.trim().parse::<usize>() {
        Ok(n) if (1..=MAX_SAMPLE_COUNT).contains(&n) => Ok(n),
        _ => Err(AppError::ValidationError(format!(
            "Sample count must be between 1 and {}, got '{}'",
            MAX_SAMPLE_COUNT, raw
        ))),
    }
}

pub fn parse_seed(raw: Option<&str>) -> Result<Option<u64>, AppError> {
    raw.map(|s| {
        s.trim()
            .parse::<u64>()
            .map_err(|_| AppError::ValidationError(format!("Invalid seed '{}'", s)))
    })
    .transpose()
}
