//! Speed estimation from finish times

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::EstimateError;
use super::sampler::estimate_mean;
use crate::data::RaceRecord;

/// Distance-like constant used to turn a finish time into a speed
pub const SPEED_CONSTANT: f64 = 1000.0;

/// Default number of draws per mean-speed estimate
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// Position and value of a finish time within a horse's sorted history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placing {
    /// 1-based position in the stored sequence, 0 if the horse has no races
    pub rank: usize,
    pub time: f64,
}

impl Placing {
    pub const NONE: Placing = Placing { rank: 0, time: 0.0 };
}

/// Converts finish times to speeds and estimates a horse's mean speed
#[derive(Debug, Clone, Copy)]
pub struct SpeedEstimator {
    speed_constant: f64,
}

impl SpeedEstimator {
    pub fn new(speed_constant: f64) -> Self {
        Self { speed_constant }
    }

    /// Map every finish time `t` to `speed_constant / t`
    ///
    /// # Errors
    /// `Division` if any finish time is exactly zero.
    pub fn to_speeds(&self, finish_times: &[f64]) -> Result<Vec<f64>, EstimateError> {
        finish_times
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                if t == 0.0 {
                    Err(EstimateError::Division { position: i + 1 })
                } else {
                    Ok(self.speed_constant / t)
                }
            })
            .collect()
    }

    /// Monte-Carlo mean speed of a horse
    pub fn mean_speed<R: Rng + ?Sized>(
        &self,
        record: &RaceRecord,
        sample_count: usize,
        rng: &mut R,
    ) -> Result<f64, EstimateError> {
        let speeds = self.to_speeds(&record.finish_times)?;
        estimate_mean(&speeds, sample_count, rng)
    }

    /// Shortest finish time (highest speed). First occurrence wins.
    pub fn fastest(&self, record: &RaceRecord) -> Placing {
        Self::scan(&record.finish_times, |candidate, best| candidate < best)
    }

    /// Longest finish time (lowest speed). First occurrence wins.
    pub fn slowest(&self, record: &RaceRecord) -> Placing {
        Self::scan(&record.finish_times, |candidate, best| candidate > best)
    }

    fn scan(times: &[f64], better: impl Fn(f64, f64) -> bool) -> Placing {
        let Some(&first) = times.first() else {
            return Placing::NONE;
        };

        let mut best = Placing { rank: 1, time: first };
        for (i, &t) in times.iter().enumerate().skip(1) {
            if better(t, best.time) {
                best = Placing { rank: i + 1, time: t };
            }
        }
        best
    }
}

impl Default for SpeedEstimator {
    fn default() -> Self {
        Self::new(SPEED_CONSTANT)
    }
}
