//! Detection utilities for time series analysis.
//!
//! This module provides:
//! - Autocorrelation estimation (direct and FFT)
//! - Seasonality period detection from the autocorrelation function

mod acf;
pub mod fft;
mod seasonality;

pub use acf::{acf, autocorrelation, AcfMethod};
pub use seasonality::{
    detect_seasonality, find_peak, PeakSelection, SeasonalityConfig, SeasonalityDetector,
    SeasonalityResult, DEFAULT_MAX_LAG, SIGNIFICANCE_THRESHOLD,
};
