use serde::{Deserialize, Serialize};

use crate::core::ComparisonResult;

/// Query string for `/compare`
///
/// Values are kept as raw strings so that bad input is reported with the
/// API's own error body instead of the framework's.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CompareQuery {
    pub horse1: Option<String>,
    pub horse2: Option<String>,
    #[serde(default)]
    pub samples: Option<String>,
    #[serde(default)]
    pub seed: Option<String>,
}

/// Comparison response. `faster_horse` and `slower_horse` are ranks.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub faster_horse: usize,
    pub slower_horse: usize,
    pub faster_speed: f64,
    pub slower_speed: f64,
    pub faster_entity_id: u32,
    pub slower_entity_id: u32,
    pub samples: usize,
}

impl From<ComparisonResult> for CompareResponse {
    fn from(result: ComparisonResult) -> Self {
        Self {
            faster_horse: result.faster.rank,
            slower_horse: result.slower.rank,
            faster_speed: result.faster.mean_speed,
            slower_speed: result.slower.mean_speed,
            faster_entity_id: result.faster.entity_id,
            slower_entity_id: result.slower.entity_id,
            samples: result.sample_count,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub horses_loaded: usize,
    pub races_loaded: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
