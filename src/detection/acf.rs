//! Autocorrelation function estimation.
//!
//! Uses the standard biased estimator: for lag `k`,
//! `acf[k] = sum_t (x[t] - m)(x[t+k] - m) / sum_t (x[t] - m)^2`
//! with the full-series mean `m`. Both the numerator and the denominator
//! carry the same `1/N`, so `acf[0]` is exactly 1.
//!
//! The ratio does not change under `x -> a*x + b`, so sums run over the
//! deviations rescaled to unit magnitude.

use serde::{Deserialize, Serialize};

use super::fft::{autocovariance_direct, autocovariance_fft};
use crate::error::{Result, SeasonalityError};
use crate::utils::stats::unit_deviations;

/// Strategy used to compute the autocorrelation vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcfMethod {
    /// Direct summation, O(N * max_lag).
    Direct,
    /// Zero-padded FFT, O(N log N).
    #[default]
    Fft,
}

impl AcfMethod {
    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            AcfMethod::Direct => "direct",
            AcfMethod::Fft => "fft",
        }
    }
}

/// Check the series and lag bound shared by every estimator.
pub(crate) fn validate(series: &[f64], max_lag: usize) -> Result<()> {
    let n = series.len();
    if n < 2 {
        return Err(SeasonalityError::invalid(format!(
            "series must contain at least 2 samples, got {n}"
        )));
    }
    if max_lag == 0 {
        return Err(SeasonalityError::invalid("max_lag must be at least 1"));
    }
    if max_lag >= n {
        return Err(SeasonalityError::invalid(format!(
            "max_lag must be smaller than series length ({max_lag} >= {n})"
        )));
    }
    if let Some(index) = series.iter().position(|x| !x.is_finite()) {
        return Err(SeasonalityError::invalid(format!(
            "series contains a non-finite value at index {index}"
        )));
    }
    Ok(())
}

/// Compute the autocorrelation vector for lags `0..=max_lag`.
///
/// # Errors
/// * [`SeasonalityError::InvalidParameter`] if the series has fewer than two
///   samples, contains NaN or infinity, or `max_lag` is outside `[1, N-1]`.
/// * [`SeasonalityError::DegenerateInput`] if the series has zero variance.
pub fn acf(series: &[f64], max_lag: usize, method: AcfMethod) -> Result<Vec<f64>> {
    validate(series, max_lag)?;

    let deviations = unit_deviations(series).ok_or_else(|| {
        SeasonalityError::DegenerateInput(
            "series has zero variance, autocorrelation is undefined".to_string(),
        )
    })?;

    let acov = match method {
        AcfMethod::Direct => autocovariance_direct(&deviations, max_lag),
        AcfMethod::Fft => autocovariance_fft(&deviations, max_lag),
    };

    let c0 = acov[0];
    let mut values: Vec<f64> = acov.iter().map(|c| c / c0).collect();
    values[0] = 1.0;
    Ok(values)
}

/// Autocorrelation at a single lag by direct summation.
///
/// Returns `NaN` when the lag is not shorter than the series and `0.0` for a
/// zero-variance series.
pub fn autocorrelation(series: &[f64], lag: usize) -> f64 {
    let n = series.len();
    if n <= lag {
        return f64::NAN;
    }

    let Some(deviations) = unit_deviations(series) else {
        return 0.0;
    };
    let denominator: f64 = deviations.iter().map(|x| x * x).sum();
    let numerator: f64 = deviations[lag..]
        .iter()
        .zip(&deviations)
        .map(|(a, b)| a * b)
        .sum();

    numerator / denominator
}
