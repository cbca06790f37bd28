//! Value-weighted empirical sampling
//!
//! The cumulative weight at index i is the running sum of the values up to i,
//! normalised by the total:
//!
//! ```text
//! cdf[i] = (v[0] + ... + v[i]) / (v[0] + ... + v[n-1])
//! ```
//!
//! Larger values therefore occupy a wider slice of [0, 1] and are drawn more
//! often than smaller ones. Sampling is inverse-transform: for a uniform draw
//! u, pick the leftmost index with cdf[i] >= u.

use rand::Rng;

use super::error::EstimateError;

/// Cumulative-weight table over a borrowed slice of values
#[derive(Debug, Clone)]
pub struct EmpiricalDistribution<'a> {
    values: &'a [f64],
    cumulative: Vec<f64>,
}

impl<'a> EmpiricalDistribution<'a> {
    /// Build the cumulative table
    ///
    /// # Errors
    /// `EmptyInput` if `values` is empty or sums to zero or less.
    pub fn build(values: &'a [f64]) -> Result<Self, EstimateError> {
        let total: f64 = values.iter().sum();
        if values.is_empty() || total <= 0.0 {
            return Err(EstimateError::EmptyInput);
        }

        let mut cumulative = Vec::with_capacity(values.len());
        let mut running = 0.0;
        for &v in values {
            running += v;
            cumulative.push(running / total);
        }

        // Rounding can leave the tail just under 1.0
        if let Some(last) = cumulative.last_mut() {
            *last = 1.0;
        }

        Ok(Self { values, cumulative })
    }

    /// Inverse-CDF lookup for a draw `u` in [0, 1)
    ///
    /// Ties resolve to the lowest index.
    pub fn sample(&self, u: f64) -> Result<f64, EstimateError> {
        let idx = self.cumulative.partition_point(|&c| c < u);
        self.values
            .get(idx)
            .copied()
            .ok_or(EstimateError::InvariantViolation { draw: u })
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }
}

/// Monte-Carlo mean of `sample_count` draws from the value-weighted
/// distribution of `values`
///
/// Returns 0.0 when there is nothing to sample from (no values, a
/// non-positive sum, or `sample_count == 0`).
pub fn estimate_mean<R: Rng + ?Sized>(
    values: &[f64],
    sample_count: usize,
    rng: &mut R,
) -> Result<f64, EstimateError> {
    if sample_count == 0 {
        return Ok(0.0);
    }

    let dist = match EmpiricalDistribution::build(values) {
        Ok(dist) => dist,
        Err(EstimateError::EmptyInput) => return Ok(0.0),
        Err(e) => return Err(e),
    };

    // Offsets from the first draw keep a constant sequence bit-exact
    let base = dist.sample(rng.gen())?;
    let mut offset = 0.0;
    for _ in 1..sample_count {
        let u: f64 = rng.gen();
        offset += dist.sample(u)? - base;
    }

    Ok(base + offset / sample_count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_cumulative_non_decreasing_and_ends_at_one() {
        let fixtures: [&[f64]; 5] = [
            &[1.0],
            &[100.0, 50.0, 33.333],
            &[0.1, 0.2, 0.3, 0.4],
            &[16.39, 16.58, 16.61, 16.95, 17.02, 17.3],
            &[1e-6, 1e6, 3.0],
        ];

        for values in fixtures {
            let dist = EmpiricalDistribution::build(values).unwrap();
            let cdf = dist.cumulative();

            assert_eq!(cdf.len(), values.len());
            assert!(cdf.windows(2).all(|w| w[0] <= w[1]), "cdf {:?}", cdf);
            assert!(cdf.iter().all(|&c| (0.0..=1.0).contains(&c)));
            assert!((cdf[cdf.len() - 1] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cumulative_is_value_weighted() {
        let values = [1.0, 3.0];
        let dist = EmpiricalDistribution::build(&values).unwrap();
        assert!((dist.cumulative()[0] - 0.25).abs() < 1e-12);
        assert_eq!(dist.cumulative()[1], 1.0);
    }

    #[test]
    fn test_build_rejects_empty_and_non_positive() {
        assert_eq!(
            EmpiricalDistribution::build(&[]).unwrap_err(),
            EstimateError::EmptyInput
        );
        assert_eq!(
            EmpiricalDistribution::build(&[0.0, 0.0]).unwrap_err(),
            EstimateError::EmptyInput
        );
        assert_eq!(
            EmpiricalDistribution::build(&[-2.0, 1.0]).unwrap_err(),
            EstimateError::EmptyInput
        );
    }

    #[test]
    fn test_sample_inverse_cdf() {
        let values = [1.0, 3.0];
        let dist = EmpiricalDistribution::build(&values).unwrap();

        assert_eq!(dist.sample(0.0).unwrap(), 1.0);
        assert_eq!(dist.sample(0.2).unwrap(), 1.0);
        assert_eq!(dist.sample(0.25).unwrap(), 1.0);
        assert_eq!(dist.sample(0.3).unwrap(), 3.0);
        assert_eq!(dist.sample(0.999).unwrap(), 3.0);
    }

    #[test]
    fn test_sample_ties_take_lowest_index() {
        // cdf = [0.25, 0.25, 1.0]
        let values = [1.0, 0.0, 3.0];
        let dist = EmpiricalDistribution::build(&values).unwrap();
        assert_eq!(dist.sample(0.25).unwrap(), 1.0);
    }

    #[test]
    fn test_sample_out_of_range_draw() {
        let values = [2.0, 2.0];
        let dist = EmpiricalDistribution::build(&values).unwrap();
        assert_eq!(
            dist.sample(1.5).unwrap_err(),
            EstimateError::InvariantViolation { draw: 1.5 }
        );
    }

    #[test]
    fn test_estimate_mean_constant_values() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in [1, 2, 5, 40] {
            let values = vec![50.0; n];
            for samples in [1, 10, 1000] {
                assert_eq!(estimate_mean(&values, samples, &mut rng).unwrap(), 50.0);
            }
        }
    }

    #[test]
    fn test_estimate_mean_constant_inexact_values() {
        let mut rng = StdRng::seed_from_u64(11);
        for v in [1000.0 / 58.0, 0.1, 1000.0 / 3.0] {
            let values = vec![v; 3];
            for samples in [1, 7, 1000] {
                assert_eq!(estimate_mean(&values, samples, &mut rng).unwrap(), v);
            }
        }
    }

    #[test]
    fn test_estimate_mean_empty_is_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(estimate_mean(&[], 1000, &mut rng).unwrap(), 0.0);
        assert_eq!(estimate_mean(&[0.0], 1000, &mut rng).unwrap(), 0.0);
        assert_eq!(estimate_mean(&[10.0], 0, &mut rng).unwrap(), 0.0);
    }

    #[test]
    fn test_estimate_mean_favours_large_values() {
        // P(1.0) = 0.25, P(3.0) = 0.75 -> expected 2.5, a plain bootstrap gives 2.0
        let values = [1.0, 3.0];
        let mut rng = StdRng::seed_from_u64(42);
        let mean = estimate_mean(&values, 20_000, &mut rng).unwrap();
        assert!((mean - 2.5).abs() < 0.05, "mean = {}", mean);
    }

    #[test]
    fn test_estimate_mean_seeded_is_reproducible() {
        let values = [100.0, 50.0, 33.3];
        let a = estimate_mean(&values, 500, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = estimate_mean(&values, 500, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }
}
