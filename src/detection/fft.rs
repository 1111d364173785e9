//! FFT utilities for autocovariance estimation.
//!
//! The autocovariance of a centered signal is the inverse transform of its
//! power spectrum. Zero-padding to at least `2N - 1` samples turns the
//! circular correlation computed by the FFT into the linear one.

use rustfft::{num_complex::Complex64, FftPlanner};

/// Length of the zero-padded FFT buffer for a signal of length `n`.
///
/// The next power of two that is at least `2n - 1`.
pub fn padded_length(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    (2 * n - 1).next_power_of_two()
}

/// Compute the biased autocovariance of an already-centered signal via FFT.
///
/// Returns `max_lag + 1` values where index `k` is
/// `sum_{t} x[t] * x[t + k] / N`. Lags at or beyond the signal length are
/// zero.
///
/// # Arguments
/// * `centered` - Input signal with its mean already removed
/// * `max_lag` - Largest lag to return
pub fn autocovariance_fft(centered: &[f64], max_lag: usize) -> Vec<f64> {
    let n = centered.len();
    if n == 0 {
        return vec![0.0; max_lag + 1];
    }

    let nfft = padded_length(n);
    let mut buffer: Vec<Complex64> = centered
        .iter()
        .map(|&x| Complex64::new(x, 0.0))
        .chain(std::iter::repeat(Complex64::new(0.0, 0.0)))
        .take(nfft)
        .collect();

    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(nfft).process(&mut buffer);

    // Power spectrum |X[k]|^2
    for value in buffer.iter_mut() {
        *value = Complex64::new(value.norm_sqr(), 0.0);
    }

    planner.plan_fft_inverse(nfft).process(&mut buffer);

    // rustfft leaves the inverse unnormalized
    let scale = (nfft * n) as f64;
    (0..=max_lag)
        .map(|lag| if lag < n { buffer[lag].re / scale } else { 0.0 })
        .collect()
}

/// Compute the biased autocovariance of an already-centered signal by direct summation.
///
/// Same output as [`autocovariance_fft`], in O(N * max_lag).
pub fn autocovariance_direct(centered: &[f64], max_lag: usize) -> Vec<f64> {
    let n = centered.len();
    (0..=max_lag)
        .map(|lag| {
            if lag >= n {
                return 0.0;
            }
            centered
                .iter()
                .zip(centered.iter().skip(lag))
                .map(|(a, b)| a * b)
                .sum::<f64>()
                / n as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn generate_sine(n: usize, period: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * i as f64 / period as f64).sin())
            .collect()
    }

    #[test]
    fn padded_length_covers_linear_correlation() {
        assert_eq!(padded_length(0), 0);
        assert_eq!(padded_length(1), 1);
        assert_eq!(padded_length(5), 16);
        assert_eq!(padded_length(8), 16);
        assert_eq!(padded_length(500), 1024);
    }

    #[test]
    fn fft_matches_direct_on_sine() {
        let signal = generate_sine(200, 12);
        let fft = autocovariance_fft(&signal, 40);
        let direct = autocovariance_direct(&signal, 40);

        assert_eq!(fft.len(), 41);
        for (a, b) in fft.iter().zip(direct.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-10);
        }
    }

    #[test]
    fn fft_matches_direct_on_short_signal() {
        let signal = [1.0, -2.0, 0.5, 3.0, -2.5];
        let fft = autocovariance_fft(&signal, 4);
        let direct = autocovariance_direct(&signal, 4);

        for (a, b) in fft.iter().zip(direct.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn lag_zero_is_mean_square() {
        let signal = [1.0, -1.0, 2.0, -2.0];
        let acov = autocovariance_direct(&signal, 0);
        assert_relative_eq!(acov[0], 2.5, epsilon = 1e-12);
    }

    #[test]
    fn lags_past_the_end_are_zero() {
        let signal = [1.0, -1.0, 0.5];
        let fft = autocovariance_fft(&signal, 5);
        let direct = autocovariance_direct(&signal, 5);

        for lag in 3..=5 {
            assert_eq!(fft[lag], 0.0);
            assert_eq!(direct[lag], 0.0);
        }
    }

    #[test]
    fn empty_signal_yields_zeros() {
        assert_eq!(autocovariance_fft(&[], 2), vec![0.0; 3]);
        assert_eq!(autocovariance_direct(&[], 2), vec![0.0; 3]);
    }
}
