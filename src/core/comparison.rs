//! Head-to-head comparison of two horses by estimated mean speed

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::error::CompareError;
use super::speed::{Placing, SpeedEstimator, DEFAULT_SAMPLE_COUNT};
use crate::data::{RaceRecord, RecordStore};

/// One side of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparedHorse {
    pub rank: usize,
    pub entity_id: u32,
    pub mean_speed: f64,
}

/// Outcome of comparing two horses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub faster: ComparedHorse,
    pub slower: ComparedHorse,
    pub sample_count: usize,
}

/// Summary of a single horse's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseProfile {
    pub rank: usize,
    pub entity_id: u32,
    pub entry_cost: f64,
    pub race_count: usize,
    pub fastest: Placing,
    pub slowest: Placing,
}

/// Derive a per-side seed from a request seed (SplitMix64)
pub fn derive_seed(base_seed: u64, counter: u64) -> u64 {
    let mut z = base_seed.wrapping_add(counter.wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Compares horses held in a finalized `RecordStore`
#[derive(Debug, Clone)]
pub struct ComparisonService {
    store: Arc<RecordStore>,
    estimator: SpeedEstimator,
    default_sample_count: usize,
}

impl ComparisonService {
    pub fn new(store: Arc<RecordStore>, estimator: SpeedEstimator, default_sample_count: usize) -> Self {
        Self {
            store,
            estimator,
            default_sample_count,
        }
    }

    /// Service with the standard speed constant and 1000 draws per estimate
    pub fn with_defaults(store: Arc<RecordStore>) -> Self {
        Self::new(store, SpeedEstimator::default(), DEFAULT_SAMPLE_COUNT)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn default_sample_count(&self) -> usize {
        self.default_sample_count
    }

    /// Compare the horses at `rank1` and `rank2`
    ///
    /// Each side is estimated with its own RNG. With `seed` set, the two RNGs
    /// are derived from it and the result is reproducible; otherwise they are
    /// seeded from OS entropy. On equal mean speeds `rank1` is reported faster.
    pub fn compare(
        &self,
        rank1: usize,
        rank2: usize,
        sample_count: usize,
        seed: Option<u64>,
    ) -> Result<ComparisonResult, CompareError> {
        let horse1 = self.store.lookup_by_rank(rank1)?;
        let horse2 = self.store.lookup_by_rank(rank2)?;

        let mut rng1 = Self::side_rng(seed, 0);
        let mut rng2 = Self::side_rng(seed, 1);
        let speed1 = self.estimator.mean_speed(horse1, sample_count, &mut rng1)?;
        let speed2 = self.estimator.mean_speed(horse2, sample_count, &mut rng2)?;

        let first = ComparedHorse {
            rank: rank1,
            entity_id: horse1.entity_id,
            mean_speed: speed1,
        };
        let second = ComparedHorse {
            rank: rank2,
            entity_id: horse2.entity_id,
            mean_speed: speed2,
        };

        let (faster, slower) = if speed2 > speed1 {
            (second, first)
        } else {
            (first, second)
        };

        debug!(
            "Compared rank {} ({:.3}) vs rank {} ({:.3}) over {} samples",
            rank1, speed1, rank2, speed2, sample_count
        );

        Ok(ComparisonResult {
            faster,
            slower,
            sample_count,
        })
    }

    /// Fastest and slowest finishes for the horse at `rank`
    pub fn profile(&self, rank: usize) -> Result<HorseProfile, CompareError> {
        let record = self.store.lookup_by_rank(rank)?;
        Ok(self.profile_of(rank, record))
    }

    /// Profiles of every horse in rank order
    pub fn profiles(&self) -> Vec<HorseProfile> {
        self.store
            .iter_ranked()
            .map(|(rank, record)| self.profile_of(rank, record))
            .collect()
    }

    fn profile_of(&self, rank: usize, record: &RaceRecord) -> HorseProfile {
        HorseProfile {
            rank,
            entity_id: record.entity_id,
            entry_cost: record.entry_cost,
            race_count: record.race_count(),
            fastest: self.estimator.fastest(record),
            slowest: self.estimator.slowest(record),
        }
    }

    fn side_rng(seed: Option<u64>, side: u64) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(derive_seed(seed, side)),
            None => StdRng::from_entropy(),
        }
    }
}
