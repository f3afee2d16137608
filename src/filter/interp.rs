use std::cmp::Ordering;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("invalid calibration data: {0}")]
    Csv(#[from] csv::Error),
    #[error("calibration table needs at least two points")]
    TooFewPoints,
}

/// One calibration sample: the raw sensor reading observed at a known value.
/// Rows deserialize positionally; the file carries no header.
#[derive(Debug, Deserialize)]
struct CalibrationRow {
    value: f64,
    reading: f64,
}

/// Piecewise-linear map from raw readings to calibrated values, clamped to
/// the table's end values outside the covered range.
pub struct InterpTable {
    readings: Vec<f64>,
    values: Vec<f64>,
}

impl InterpTable {
    pub fn from_csv_path(path: &Path) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_path(path)?;
        let mut points = Vec::new();
        for row in reader.deserialize() {
            let row: CalibrationRow = row?;
            points.push((row.reading, row.value));
        }
        Self::from_points(points)
    }

    /// Points are (reading, value) pairs in any order; interpolation needs
    /// monotonic readings, so they get sorted here.
    pub fn from_points(mut points: Vec<(f64, f64)>) -> Result<Self, TableError> {
        if points.len() < 2 {
            return Err(TableError::TooFewPoints);
        }
        points.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let (readings, values) = points.into_iter().unzip();
        Ok(Self { readings, values })
    }

    pub fn lookup(&self, reading: f64) -> f64 {
        let last = self.readings.len() - 1;
        if reading <= self.readings[0] {
            return self.values[0];
        }
        if reading >= self.readings[last] {
            return self.values[last];
        }
        let hi = self.readings.partition_point(|&r| r < reading);
        let (x0, x1) = (self.readings[hi - 1], self.readings[hi]);
        let (y0, y1) = (self.values[hi - 1], self.values[hi]);
        if x1 == x0 {
            // Duplicate readings in the table; either value is as good.
            return y0;
        }
        y0 + (y1 - y0) * (reading - x0) / (x1 - x0)
    }
}
