//! Statistical utility functions.

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate the population variance of a slice (n denominator).
///
/// This is the normalization used by the autocorrelation estimator, so
/// that lag 0 of the autocovariance equals this value exactly.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Calculate the sample variance of a slice (n-1 denominator).
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    sum_sq / (values.len() - 1) as f64
}

/// Calculate the sample standard deviation of a slice.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Subtract the mean from every sample.
pub fn center(values: &[f64]) -> Vec<f64> {
    let m = mean(values);
    values.iter().map(|x| x - m).collect()
}

/// Largest absolute value, or `0.0` for an empty slice.
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
}

/// Whether every sample holds the same value. Empty slices count as constant.
pub fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(&first) => values.iter().all(|&x| x == first),
        None => true,
    }
}

/// Center a series and scale it so the largest deviation from the mean is one.
///
/// The series is first divided by its largest magnitude, so squares and
/// lagged products stay finite for any finite input. Returns `None` when
/// every sample is equal.
pub fn unit_deviations(values: &[f64]) -> Option<Vec<f64>> {
    if is_constant(values) {
        return None;
    }
    let magnitude = max_abs(values);
    let scaled: Vec<f64> = values.iter().map(|x| x / magnitude).collect();

    let mut centered = center(&scaled);
    let spread = max_abs(&centered);
    if spread == 0.0 || !spread.is_finite() {
        return None;
    }
    for x in &mut centered {
        *x /= spread;
    }
    Some(centered)
}

/// Smallest and largest finite value, or `None` for an empty slice.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
