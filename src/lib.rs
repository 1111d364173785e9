//! # acfperiod
//!
//! Seasonality period detection for univariate time series.
//!
//! The detector computes the autocorrelation function of a series up to a
//! bounded lag and reports the lag holding the largest autocorrelation, if
//! that value clears a significance threshold of 0.1. The crate also ships a
//! CSV loader for metric exports and a synthetic seasonal series generator.
//!
//! ```
//! use acfperiod::synthetic::{generate_seasonal_series, SyntheticConfig};
//! use acfperiod::detect_seasonality;
//!
//! let series = generate_seasonal_series(&SyntheticConfig::new(10, 500).with_noise(0.0))?;
//! assert_eq!(detect_seasonality(&series, 30)?, Some(10));
//! # Ok::<(), acfperiod::SeasonalityError>(())
//! ```

pub mod data;
pub mod detection;
pub mod error;
pub mod synthetic;
pub mod utils;

pub use detection::{detect_seasonality, SeasonalityConfig, SeasonalityDetector, SeasonalityResult};
pub use error::{Result, SeasonalityError};

pub mod prelude {
    pub use crate::detection::{
        acf, detect_seasonality, AcfMethod, PeakSelection, SeasonalityConfig,
        SeasonalityDetector, SeasonalityResult, SIGNIFICANCE_THRESHOLD,
    };
    pub use crate::error::{Result, SeasonalityError};
}
