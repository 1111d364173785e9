//! Loading metric series from CSV files.
//!
//! The expected layout is the common metric export format: a `timestamp`
//! column and a `value` column, one observation per row.
//!
//! # Example
//!
//! ```no_run
//! use acfperiod::data::load_metric_csv;
//!
//! let metrics = load_metric_csv("data/ec2_request_latency.csv")?;
//! println!("Loaded {} observations", metrics.len());
//! # Ok::<(), acfperiod::data::DataError>(())
//! ```

mod loader;

pub use loader::{load_column, load_metric_csv, TIMESTAMP_COLUMN, VALUE_COLUMN};

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{Duration, NaiveDateTime};
use thiserror::Error;

/// Errors that can occur during data loading.
#[derive(Error, Debug)]
pub enum DataError {
    /// The file could not be opened or read.
    #[error("could not read '{path}': {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid CSV.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header.
    #[error("the CSV file must contain a '{column}' column (found: {found:?})")]
    MissingColumn {
        /// The column that was expected.
        column: String,
        /// The header that was actually present.
        found: Vec<String>,
    },

    /// A cell could not be parsed as a number.
    #[error("invalid value at row {row}, column '{column}': '{value}'")]
    InvalidValue {
        /// Data row (1-indexed, header excluded).
        row: usize,
        /// Column name.
        column: String,
        /// The offending cell.
        value: String,
    },

    /// The file has a header but no data rows.
    #[error("no data rows in '{0}'")]
    Empty(PathBuf),
}

impl DataError {
    /// Whether the error means the file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// A metric series loaded from a CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    /// Parsed timestamps, `None` where the cell could not be parsed.
    pub timestamps: Vec<Option<NaiveDateTime>>,
    /// Metric values in file order.
    pub values: Vec<f64>,
    /// Number of columns in the source file.
    pub columns: usize,
}

impl MetricSeries {
    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (rows, columns) of the source table.
    pub fn shape(&self) -> (usize, usize) {
        (self.values.len(), self.columns)
    }

    /// The most common positive step between consecutive parsed timestamps.
    ///
    /// Returns `None` if fewer than two consecutive timestamps parsed.
    /// Ties go to the shorter step.
    pub fn sampling_interval(&self) -> Option<Duration> {
        let mut counts: HashMap<i64, usize> = HashMap::new();
        for pair in self.timestamps.windows(2) {
            if let [Some(a), Some(b)] = pair {
                let step = (*b - *a).num_seconds();
                if step > 0 {
                    *counts.entry(step).or_insert(0) += 1;
                }
            }
        }

        counts
            .into_iter()
            .max_by(|(step_a, count_a), (step_b, count_b)| {
                count_a.cmp(count_b).then(step_b.cmp(step_a))
            })
            .map(|(step, _)| Duration::seconds(step))
    }
}
