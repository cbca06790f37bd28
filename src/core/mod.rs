//! Speed estimation and horse comparison

pub mod comparison;
pub mod error;
pub mod sampler;
pub mod speed;

// Re-export commonly used types
pub use comparison::{ComparedHorse, ComparisonResult, ComparisonService, HorseProfile};
pub use error::{CompareError, EstimateError};
pub use sampler::{estimate_mean, EmpiricalDistribution};
pub use speed::{Placing, SpeedEstimator, DEFAULT_SAMPLE_COUNT, SPEED_CONSTANT};
