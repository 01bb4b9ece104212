//! NaN-aware moments and quantiles
//!
//! Missing observations are carried as NaN. Every statistic here ignores
//! non-finite values and returns NaN when too few finite values remain;
//! degenerate statistics are results, not errors.

use crate::{Error, Result};

fn finite(data: &[f64]) -> impl Iterator<Item = f64> + '_ {
    data.iter().copied().filter(|x| x.is_finite())
}

/// Arithmetic mean of the finite values, NaN if there are none
pub fn mean(data: &[f64]) -> f64 {
    let (sum, n) = finite(data).fold((0.0, 0usize), |(s, n), x| (s + x, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

/// Sample standard deviation (n - 1 denominator) of the finite values
///
/// NaN with fewer than two finite values.
pub fn std_dev(data: &[f64]) -> f64 {
    let n = finite(data).count();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(data);
    let ss: f64 = finite(data).map(|x| (x - m) * (x - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Number of finite values
pub fn count(data: &[f64]) -> usize {
    finite(data).count()
}

/// Quantile with linear interpolation between order statistics
///
/// Position `p * (n - 1)` in the sorted finite values. NaN if no finite
/// values remain.
pub fn quantile(data: &[f64], p: f64) -> Result<f64> {
    validate_probability(p)?;
    let mut sorted: Vec<f64> = finite(data).collect();
    if sorted.is_empty() {
        return Ok(f64::NAN);
    }
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(quantile_sorted(&sorted, p))
}

/// Several quantiles of the same data, sorting once
pub fn quantiles(data: &[f64], probabilities: &[f64]) -> Result<Vec<f64>> {
    for &p in probabilities {
        validate_probability(p)?;
    }
    let mut sorted: Vec<f64> = finite(data).collect();
    if sorted.is_empty() {
        return Ok(vec![f64::NAN; probabilities.len()]);
    }
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(probabilities
        .iter()
        .map(|&p| quantile_sorted(&sorted, p))
        .collect())
}

fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = p * (sorted.len() - 1) as f64;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Reject probabilities outside [0, 1] (including NaN)
pub fn validate_probability(p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::invalid_quantile(p));
    }
    Ok(())
}
