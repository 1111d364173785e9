//! Synthetic seasonal series.
//!
//! Generates `offset + amplitude * sin(2πt / period) + ε` with Gaussian
//! noise `ε ~ N(0, noise_std)`, for demos and tests.

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::Normal;

use crate::error::{Result, SeasonalityError};

/// Parameters of a synthetic seasonal series.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticConfig {
    /// Length of one seasonal cycle in samples.
    pub period: usize,
    /// Number of samples.
    pub length: usize,
    /// Level the sinusoid oscillates around.
    pub offset: f64,
    /// Amplitude of the sinusoid.
    pub amplitude: f64,
    /// Standard deviation of the additive noise. Zero disables noise.
    pub noise_std: f64,
    /// RNG seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            period: 10,
            length: 500,
            offset: 15.0,
            amplitude: 10.0,
            noise_std: 2.0,
            seed: None,
        }
    }
}

impl SyntheticConfig {
    /// Create a configuration for the given period and length with default shape.
    pub fn new(period: usize, length: usize) -> Self {
        Self {
            period,
            length,
            ..Self::default()
        }
    }

    /// Set the noise standard deviation.
    pub fn with_noise(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    /// Set offset and amplitude.
    pub fn with_shape(mut self, offset: f64, amplitude: f64) -> Self {
        self.offset = offset;
        self.amplitude = amplitude;
        self
    }

    /// Fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Generate a seasonal series.
///
/// # Errors
/// Returns [`SeasonalityError::InvalidParameter`] if `period` or `length` is
/// zero or `noise_std` is negative or not finite.
pub fn generate_seasonal_series(config: &SyntheticConfig) -> Result<Vec<f64>> {
    if config.period == 0 {
        return Err(SeasonalityError::invalid("period must be at least 1"));
    }
    if config.length == 0 {
        return Err(SeasonalityError::invalid("length must be at least 1"));
    }
    if !config.noise_std.is_finite() || config.noise_std < 0.0 {
        return Err(SeasonalityError::invalid(format!(
            "noise_std must be finite and non-negative, got {}",
            config.noise_std
        )));
    }

    let omega = 2.0 * std::f64::consts::PI / config.period as f64;
    let mut series: Vec<f64> = (0..config.length)
        .map(|t| config.offset + config.amplitude * (omega * t as f64).sin())
        .collect();

    if config.noise_std > 0.0 {
        let noise = Normal::new(0.0, config.noise_std)
            .map_err(|e| SeasonalityError::invalid(e.to_string()))?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        for value in series.iter_mut() {
            *value += noise.sample(&mut rng);
        }
    }

    Ok(series)
}

/// Generate Gaussian white noise with mean zero.
pub fn white_noise(length: usize, std_dev: f64, seed: u64) -> Result<Vec<f64>> {
    let config = SyntheticConfig::new(1, length)
        .with_shape(0.0, 0.0)
        .with_noise(std_dev)
        .with_seed(seed);
    generate_seasonal_series(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn noiseless_series_is_exact_sinusoid() {
        let config = SyntheticConfig::new(10, 20).with_noise(0.0);
        let series = generate_seasonal_series(&config).unwrap();

        assert_eq!(series.len(), 20);
        assert_relative_eq!(series[0], 15.0, epsilon = 1e-12);
        assert_relative_eq!(series[5], 15.0, epsilon = 1e-9);
        assert_relative_eq!(series[10], 15.0, epsilon = 1e-9);
        // Quarter cycle peaks at offset + amplitude
        let peak = generate_seasonal_series(&SyntheticConfig::new(4, 4).with_noise(0.0)).unwrap();
        assert_relative_eq!(peak[1], 25.0, epsilon = 1e-9);
    }

    #[test]
    fn seeded_noise_is_deterministic() {
        let config = SyntheticConfig::new(10, 100).with_seed(42);
        let a = generate_seasonal_series(&config).unwrap();
        let b = generate_seasonal_series(&config).unwrap();
        assert_eq!(a, b);

        let c = generate_seasonal_series(&config.clone().with_seed(43)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn white_noise_has_expected_moments() {
        let noise = white_noise(5000, 2.0, 7).unwrap();
        let mean = crate::utils::mean(&noise);
        let sd = crate::utils::std_dev(&noise);
        assert!(mean.abs() < 0.15, "mean too far from zero: {}", mean);
        assert!((sd - 2.0).abs() < 0.15, "std dev too far from 2: {}", sd);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(generate_seasonal_series(&SyntheticConfig::new(0, 10)).is_err());
        assert!(generate_seasonal_series(&SyntheticConfig::new(10, 0)).is_err());
        assert!(generate_seasonal_series(&SyntheticConfig::new(10, 10).with_noise(-1.0)).is_err());
        assert!(
            generate_seasonal_series(&SyntheticConfig::new(10, 10).with_noise(f64::NAN)).is_err()
        );
    }

    #[test]
    fn default_matches_demo_parameters() {
        let config = SyntheticConfig::default();
        assert_eq!(config.period, 10);
        assert_eq!(config.length, 500);
        assert_eq!(config.offset, 15.0);
        assert_eq!(config.amplitude, 10.0);
        assert_eq!(config.noise_std, 2.0);
    }
}
