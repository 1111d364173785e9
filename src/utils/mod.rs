//! Utility functions shared by the detectors and the loader.

pub mod stats;

pub use stats::{mean, population_variance, std_dev, variance};
