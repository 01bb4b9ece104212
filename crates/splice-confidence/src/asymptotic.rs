//! Normal-approximation interval for a shift in window means

use crate::api::DEFAULT_QUANTILES;
use crate::traits::{check_matching_fields, ContinuityTest};
use crate::types::{IntervalEstimate, Statistic, StatisticKey, TestOutput};
use splice_core::{moments, Error, Result, TimeSeries};
use statrs::distribution::{ContinuousCDF, Normal};

/// Analytic interval on `mean(after) - mean(before)` per field
///
/// Uses the Welch standard error `sqrt(s1²/n1 + s2²/n2)` over the finite
/// values of each window and standard normal quantiles. Windows with fewer
/// than two finite values give NaN bounds.
#[derive(Debug, Clone)]
pub struct AsymptoticMeanShift {
    quantiles: Vec<f64>,
}

impl Default for AsymptoticMeanShift {
    fn default() -> Self {
        Self {
            quantiles: DEFAULT_QUANTILES.to_vec(),
        }
    }
}

impl AsymptoticMeanShift {
    pub fn new(quantiles: &[f64]) -> Result<Self> {
        if quantiles.is_empty() {
            return Err(Error::InvalidParameter(
                "At least one quantile is required".to_string(),
            ));
        }
        for &q in quantiles {
            moments::validate_probability(q)?;
        }
        Ok(Self {
            quantiles: quantiles.to_vec(),
        })
    }

    pub fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    /// Bounds on the mean shift between two samples of one field
    pub fn interval(&self, before: &[f64], after: &[f64]) -> Result<Vec<f64>> {
        let normal = Normal::new(0.0, 1.0).map_err(|e| {
            Error::Computation(format!("Failed to create normal distribution: {e}"))
        })?;

        let shift = moments::mean(after) - moments::mean(before);
        let variance = |x: &[f64]| {
            let s = moments::std_dev(x);
            s * s / moments::count(x) as f64
        };
        let se = (variance(before) + variance(after)).sqrt();

        Ok(self
            .quantiles
            .iter()
            .map(|&q| shift + normal.inverse_cdf(q) * se)
            .collect())
    }
}

impl ContinuityTest for AsymptoticMeanShift {
    fn name(&self) -> &'static str {
        "asymptotic"
    }

    fn evaluate(&self, before: &TimeSeries, after: &TimeSeries) -> Result<TestOutput> {
        check_matching_fields(before, after)?;
        let intervals = before
            .fields()
            .iter()
            .zip(before.columns().iter().zip(after.columns()))
            .map(|(field, (b, a))| {
                Ok(IntervalEstimate::new(
                    StatisticKey::new(field.clone(), Statistic::Mean),
                    self.quantiles.clone(),
                    self.interval(b, a)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TestOutput {
            test: self.name().to_string(),
            intervals,
            distribution: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_symmetric_interval_around_shift() {
        let test = AsymptoticMeanShift::new(&[0.025, 0.975]).unwrap();
        let before = [1.0, 2.0, 3.0, 4.0];
        let after = [3.0, 4.0, 5.0, 6.0];
        let bounds = test.interval(&before, &after).unwrap();

        // s² = 5/3 for both, n = 4
        let se = (2.0 * (5.0 / 3.0) / 4.0f64).sqrt();
        assert_relative_eq!(bounds[0], 2.0 - 1.959964 * se, epsilon = 1e-5);
        assert_relative_eq!(bounds[1], 2.0 + 1.959964 * se, epsilon = 1e-5);
    }

    #[test]
    fn test_median_probability_is_point_shift() {
        let test = AsymptoticMeanShift::new(&[0.5]).unwrap();
        let bounds = test.interval(&[1.0, 3.0], &[10.0, 12.0]).unwrap();
        assert_relative_eq!(bounds[0], 9.0);
    }

    #[test]
    fn test_single_value_window_is_nan() {
        let test = AsymptoticMeanShift::default();
        let bounds = test.interval(&[1.0], &[2.0, 3.0]).unwrap();
        assert!(bounds.iter().all(|b| b.is_nan()));
    }

    #[test]
    fn test_rejects_bad_quantiles() {
        assert!(AsymptoticMeanShift::new(&[]).is_err());
        assert!(AsymptoticMeanShift::new(&[-0.5]).is_err());
    }
}
