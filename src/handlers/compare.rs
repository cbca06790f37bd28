use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::{error, warn};

use crate::error::{parse_rank, parse_sample_count, parse_seed, AppError};
use crate::models::{CompareQuery, CompareResponse};
use crate::AppState;

/// Validated `/compare` parameters
struct CompareParams {
    horse1: usize,
    horse2: usize,
    samples: usize,
    seed: Option<u64>,
}

fn validate_query(query: &CompareQuery, default_samples: usize) -> Result<CompareParams, AppError> {
    Ok(CompareParams {
        horse1: parse_rank("horse1", query.horse1.as_deref())?,
        horse2: parse_rank("horse2", query.horse2.as_deref())?,
        samples: parse_sample_count(query.samples.as_deref(), default_samples)?,
        seed: parse_seed(query.seed.as_deref())?,
    })
}

/// Compare two horses by estimated mean speed
///
/// `horse1` and `horse2` are 1-based ranks in horse-id order.
pub async fn compare_horses(
    state: web::Data<Arc<AppState>>,
    query: web::Query<CompareQuery>,
) -> Result<HttpResponse, AppError> {
    let params = validate_query(&query, state.service.default_sample_count()).map_err(|e| {
        warn!("Rejected compare request: {}", e);
        e
    })?;

    let result = state
        .service
        .compare(params.horse1, params.horse2, params.samples, params.seed)
        .map_err(|e| {
            let err = AppError::from(e);
            match &err {
                AppError::NotFound(_) => warn!("Compare request rejected: {}", err),
                _ => error!(
                    "Compare rank {} vs rank {} failed: {}",
                    params.horse1, params.horse2, err
                ),
            }
            err
        })?;

    Ok(HttpResponse::Ok().json(CompareResponse::from(result)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(horse1: Option<&str>, horse2: Option<&str>) -> CompareQuery {
        CompareQuery {
            horse1: horse1.map(String::from),
            horse2: horse2.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_query_defaults() {
        let params = validate_query(&query(Some("1"), Some("2")), 1000).unwrap();
        assert_eq!(params.horse1, 1);
        assert_eq!(params.horse2, 2);
        assert_eq!(params.samples, 1000);
        assert_eq!(params.seed, None);
    }

    #[test]
    fn test_validate_query_rejects_bad_ranks() {
        assert!(validate_query(&query(None, Some("2")), 1000).is_err());
        assert!(validate_query(&query(Some("1"), Some("two")), 1000).is_err());
        assert!(validate_query(&query(Some("0"), Some("2")), 1000).is_err());
    }
}
