//! Seasonality detection utilities.
//!
//! Finds the dominant seasonal period of a series as the lag with the
//! largest autocorrelation, provided that value clears a significance
//! threshold.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::acf::{acf, AcfMethod};
use crate::error::Result;

/// Autocorrelation a lag must exceed to count as a seasonal period.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.1;

/// Largest lag evaluated when none is configured.
pub const DEFAULT_MAX_LAG: usize = 50;

/// How the period is chosen from the autocorrelation vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakSelection {
    /// The lag holding the maximum over all lags `1..=max_lag`, smallest lag
    /// on ties. Nothing is reported if that maximum is not above the threshold.
    #[default]
    GlobalMaximum,
    /// The first lag above the threshold that is a local maximum of the ACF.
    ///
    /// At the last evaluated lag only the left neighbour is compared.
    FirstLocalMaximum,
}

/// Result of seasonality detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityResult {
    /// The detected seasonal period, if any.
    pub period: Option<usize>,
    /// Autocorrelation at the detected period.
    pub strength: Option<f64>,
    /// Largest lag that was evaluated.
    pub max_lag: usize,
    /// Estimator that produced `acf`.
    pub method: AcfMethod,
    /// Autocorrelation vector for lags `0..=max_lag`.
    pub acf: Vec<f64>,
}

impl SeasonalityResult {
    /// Whether a seasonal period was found.
    pub fn is_seasonal(&self) -> bool {
        self.period.is_some()
    }
}

/// Configuration for seasonality detection.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalityConfig {
    /// Largest lag to evaluate. Must be smaller than the series length.
    pub max_lag: usize,
    /// Autocorrelation a candidate must strictly exceed.
    pub threshold: f64,
    /// Estimator for the autocorrelation vector.
    pub method: AcfMethod,
    /// Peak search strategy.
    pub selection: PeakSelection,
}

impl Default for SeasonalityConfig {
    fn default() -> Self {
        Self {
            max_lag: DEFAULT_MAX_LAG,
            threshold: SIGNIFICANCE_THRESHOLD,
            method: AcfMethod::default(),
            selection: PeakSelection::default(),
        }
    }
}

impl SeasonalityConfig {
    /// Set maximum lag.
    pub fn with_max_lag(mut self, max_lag: usize) -> Self {
        self.max_lag = max_lag;
        self
    }

    /// Set detection threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(-1.0, 1.0);
        self
    }

    /// Set the autocorrelation estimator.
    pub fn with_method(mut self, method: AcfMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the peak search strategy.
    pub fn with_selection(mut self, selection: PeakSelection) -> Self {
        self.selection = selection;
        self
    }
}

/// Autocorrelation-based seasonality detector.
#[derive(Debug, Clone, Default)]
pub struct SeasonalityDetector {
    config: SeasonalityConfig,
}

impl SeasonalityDetector {
    /// Create a detector with the given configuration.
    pub fn new(config: SeasonalityConfig) -> Self {
        Self { config }
    }

    /// The detector's configuration.
    pub fn config(&self) -> &SeasonalityConfig {
        &self.config
    }

    /// Detect the seasonal period of `series`.
    ///
    /// # Errors
    /// Returns [`crate::SeasonalityError::InvalidParameter`] for fewer than two
    /// samples, non-finite samples, or a `max_lag` outside `[1, N-1]`, and
    /// [`crate::SeasonalityError::DegenerateInput`] for a zero-variance series.
    pub fn detect(&self, series: &[f64]) -> Result<SeasonalityResult> {
        let config = &self.config;
        let values = acf(series, config.max_lag, config.method)?;
        let peak = find_peak(&values, config.threshold, config.selection);

        debug!(
            n = series.len(),
            max_lag = config.max_lag,
            method = config.method.name(),
            period = ?peak.map(|(lag, _)| lag),
            "seasonality search finished"
        );

        Ok(SeasonalityResult {
            period: peak.map(|(lag, _)| lag),
            strength: peak.map(|(_, value)| value),
            max_lag: config.max_lag,
            method: config.method,
            acf: values,
        })
    }
}

/// Detect the seasonal period of `series` considering lags `1..=max_lag`.
///
/// Uses the default estimator and [`SIGNIFICANCE_THRESHOLD`]. Returns
/// `Ok(None)` when no lag qualifies.
///
/// # Example
/// ```
/// use acfperiod::detect_seasonality;
///
/// let series: Vec<f64> = (0..500)
///     .map(|t| 15.0 + 10.0 * (2.0 * std::f64::consts::PI * t as f64 / 10.0).sin())
///     .collect();
/// assert_eq!(detect_seasonality(&series, 30).unwrap(), Some(10));
/// ```
pub fn detect_seasonality(series: &[f64], max_lag: usize) -> Result<Option<usize>> {
    let config = SeasonalityConfig::default().with_max_lag(max_lag);
    SeasonalityDetector::new(config)
        .detect(series)
        .map(|result| result.period)
}

/// Search a precomputed autocorrelation vector for the seasonal peak.
///
/// Index 0 is ignored. Returns the selected lag and its autocorrelation, or
/// `None` when no lag qualifies.
pub fn find_peak(acf: &[f64], threshold: f64, selection: PeakSelection) -> Option<(usize, f64)> {
    match selection {
        PeakSelection::GlobalMaximum => {
            global_maximum(acf).filter(|&(_, value)| value > threshold)
        }
        PeakSelection::FirstLocalMaximum => first_local_maximum(acf, threshold),
    }
}

/// Running-maximum scan over lags `1..`, keeping the first occurrence.
fn global_maximum(acf: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (lag, &value) in acf.iter().enumerate().skip(1) {
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((lag, value)),
        }
    }
    best
}

fn first_local_maximum(acf: &[f64], threshold: f64) -> Option<(usize, f64)> {
    let last = acf.len().checked_sub(1)?;
    (1..=last)
        .map(|lag| (lag, acf[lag]))
        .find(|&(lag, value)| {
            let rises = value > acf[lag - 1];
            let holds = lag == last || value >= acf[lag + 1];
            value > threshold && rises && holds
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeasonalityError;

    fn generate_seasonal_series(n: usize, period: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 15.0 + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / period as f64).sin())
            .collect()
    }

    #[test]
    fn detect_seasonality_with_clear_pattern() {
        let series = generate_seasonal_series(500, 10);
        assert_eq!(detect_seasonality(&series, 30).unwrap(), Some(10));
    }

    #[test]
    fn detect_weekly_seasonality() {
        let series = generate_seasonal_series(52 * 7, 7);
        assert_eq!(detect_seasonality(&series, 14).unwrap(), Some(7));
    }

    #[test]
    fn detect_seasonality_constant_series() {
        let series = vec![5.0; 5];
        assert!(matches!(
            detect_seasonality(&series, 2),
            Err(SeasonalityError::DegenerateInput(_))
        ));
    }

    #[test]
    fn detect_seasonality_rejects_large_lag() {
        let series = generate_seasonal_series(20, 5);
        assert!(matches!(
            detect_seasonality(&series, 20),
            Err(SeasonalityError::InvalidParameter(_))
        ));
    }

    #[test]
    fn detect_seasonality_max_lag_one() {
        // Linear trend: ACF(1) is large and positive
        let trend: Vec<f64> = (0..50).map(|i| i as f64).collect();
        assert_eq!(detect_seasonality(&trend, 1).unwrap(), Some(1));

        // Alternating: ACF(1) is negative
        let alternating: Vec<f64> = (0..50).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        assert_eq!(detect_seasonality(&alternating, 1).unwrap(), None);
    }

    #[test]
    fn detector_reports_diagnostics() {
        let series = generate_seasonal_series(500, 10);
        let config = SeasonalityConfig::default()
            .with_max_lag(30)
            .with_method(AcfMethod::Direct);
        let result = SeasonalityDetector::new(config).detect(&series).unwrap();

        assert!(result.is_seasonal());
        assert_eq!(result.period, Some(10));
        assert_eq!(result.max_lag, 30);
        assert_eq!(result.method, AcfMethod::Direct);
        assert_eq!(result.acf.len(), 31);
        let strength = result.strength.unwrap();
        assert!((strength - 0.98).abs() < 1e-6);
    }

    #[test]
    fn find_peak_global_maximum_prefers_smallest_lag_on_ties() {
        let acf = [1.0, 0.2, 0.6, 0.3, 0.6, 0.1];
        assert_eq!(
            find_peak(&acf, SIGNIFICANCE_THRESHOLD, PeakSelection::GlobalMaximum),
            Some((2, 0.6))
        );
    }

    #[test]
    fn find_peak_requires_maximum_above_threshold() {
        // The maximum does not clear the threshold, so nothing qualifies
        let acf = [1.0, 0.05, -0.2, 0.08, 0.1];
        assert_eq!(
            find_peak(&acf, SIGNIFICANCE_THRESHOLD, PeakSelection::GlobalMaximum),
            None
        );
    }

    #[test]
    fn find_peak_ignores_lag_zero() {
        let acf = [1.0, -0.3, -0.4];
        assert_eq!(find_peak(&acf, 0.1, PeakSelection::GlobalMaximum), None);
        assert_eq!(find_peak(&[1.0], 0.1, PeakSelection::GlobalMaximum), None);
        assert_eq!(find_peak(&[], 0.1, PeakSelection::GlobalMaximum), None);
    }

    #[test]
    fn find_peak_first_local_maximum() {
        // Harmonic at lag 6 is higher than the fundamental at lag 3
        let acf = [1.0, 0.2, 0.1, 0.5, 0.2, 0.3, 0.7, 0.4];
        assert_eq!(
            find_peak(&acf, SIGNIFICANCE_THRESHOLD, PeakSelection::GlobalMaximum),
            Some((6, 0.7))
        );
        assert_eq!(
            find_peak(&acf, SIGNIFICANCE_THRESHOLD, PeakSelection::FirstLocalMaximum),
            Some((3, 0.5))
        );
    }

    #[test]
    fn find_peak_first_local_maximum_at_right_edge() {
        let acf = [1.0, 0.0, 0.2, 0.4];
        assert_eq!(
            find_peak(&acf, SIGNIFICANCE_THRESHOLD, PeakSelection::FirstLocalMaximum),
            Some((3, 0.4))
        );
        // Monotonically decaying ACF has no local peak
        let decaying = [1.0, 0.8, 0.6, 0.4];
        assert_eq!(
            find_peak(&decaying, SIGNIFICANCE_THRESHOLD, PeakSelection::FirstLocalMaximum),
            None
        );
    }

    #[test]
    fn config_default() {
        let config = SeasonalityConfig::default();
        assert_eq!(config.max_lag, 50);
        assert!((config.threshold - 0.1).abs() < 1e-12);
        assert_eq!(config.method, AcfMethod::Fft);
        assert_eq!(config.selection, PeakSelection::GlobalMaximum);
    }

    #[test]
    fn config_threshold_is_clamped() {
        let config = SeasonalityConfig::default().with_threshold(3.0);
        assert_eq!(config.threshold, 1.0);
    }

    #[test]
    fn detection_is_idempotent() {
        let series = generate_seasonal_series(300, 12);
        let detector = SeasonalityDetector::new(SeasonalityConfig::default().with_max_lag(40));
        let first = detector.detect(&series).unwrap();
        let second = detector.detect(&series).unwrap();
        assert_eq!(first, second);
    }
}
