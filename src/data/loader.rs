//! CSV parsing for metric series.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use csv::StringRecord;
use tracing::{debug, info};

use super::{DataError, MetricSeries};

/// Header of the timestamp column.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Header of the metric value column.
pub const VALUE_COLUMN: &str = "value";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Load a metric export with `timestamp` and `value` columns.
///
/// # Example file content
/// ```csv
/// timestamp,value
/// 2014-03-07 03:41:00,45.868
/// 2014-03-07 03:46:00,47.606
/// ```
///
/// # Errors
/// Returns [`DataError::MissingColumn`] if either column is absent,
/// [`DataError::InvalidValue`] for a non-numeric value, and
/// [`DataError::Empty`] if there are no rows.
pub fn load_metric_csv(path: impl AsRef<Path>) -> Result<MetricSeries, DataError> {
    let path = path.as_ref();
    let mut reader = open(path)?;
    let headers = reader.headers()?.clone();

    let ts_idx = column_index(&headers, TIMESTAMP_COLUMN)?;
    let value_idx = column_index(&headers, VALUE_COLUMN)?;

    let mut timestamps = Vec::new();
    let mut values = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;
        timestamps.push(record.get(ts_idx).and_then(parse_timestamp));
        values.push(parse_value(&record, value_idx, row, VALUE_COLUMN)?);
    }

    if values.is_empty() {
        return Err(DataError::Empty(path.to_path_buf()));
    }

    let series = MetricSeries {
        timestamps,
        values,
        columns: headers.len(),
    };
    let (rows, columns) = series.shape();
    info!(path = %path.display(), rows, columns, "loaded metric series");
    Ok(series)
}

/// Load a single numeric column by header name.
///
/// # Errors
/// Same conditions as [`load_metric_csv`], applied to `column` only.
pub fn load_column(path: impl AsRef<Path>, column: &str) -> Result<Vec<f64>, DataError> {
    let path = path.as_ref();
    let mut reader = open(path)?;
    let headers = reader.headers()?.clone();
    let idx = column_index(&headers, column)?;

    let mut values = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        values.push(parse_value(&record, idx, i + 1, column)?);
    }

    if values.is_empty() {
        return Err(DataError::Empty(path.to_path_buf()));
    }

    info!(path = %path.display(), column, rows = values.len(), "loaded column");
    Ok(values)
}

fn open(path: &Path) -> Result<csv::Reader<BufReader<File>>, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file)))
}

fn column_index(headers: &StringRecord, column: &str) -> Result<usize, DataError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| DataError::MissingColumn {
            column: column.to_string(),
            found: headers.iter().map(str::to_string).collect(),
        })
}

fn parse_value(
    record: &StringRecord,
    idx: usize,
    row: usize,
    column: &str,
) -> Result<f64, DataError> {
    let cell = record.get(idx).unwrap_or("");
    cell.parse::<f64>().map_err(|_| DataError::InvalidValue {
        row,
        column: column.to_string(),
        value: cell.to_string(),
    })
}

fn parse_timestamp(cell: &str) -> Option<NaiveDateTime> {
    let parsed = NaiveDateTime::parse_from_str(cell, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(cell).ok().map(|dt| dt.naive_utc()));
    if parsed.is_none() {
        debug!(cell, "unparsable timestamp");
    }
    parsed
}
