// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Reads the labeled housing CSV into a RawTable: a header row
// plus string cells. Nothing is parsed as a number here — the
// encoder decides per column whether values are numeric or
// categorical, the same way a dataframe library infers dtypes.
//
// Expected columns: price (target), area, bedrooms, bathrooms,
// stories, parking (numeric), mainroad, guestroom, basement,
// hotwaterheating, airconditioning, prefarea, furnishingstatus
// (categorical).

use std::path::{Path, PathBuf};

use crate::domain::error::{PredictorError, Result};

/// A raw tabular dataset: ordered column names and string rows.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Remove the target column, returning the remaining feature table
    /// and the parsed target values.
    ///
    /// Fails with a dataset error if the target column is absent or any
    /// of its values is not numeric.
    pub fn split_target(mut self, target: &str) -> Result<(RawTable, Vec<f64>)> {
        let target_idx = self
            .columns
            .iter()
            .position(|c| c == target)
            .ok_or_else(|| {
                PredictorError::Dataset(format!("target column '{target}' not found"))
            })?;

        self.columns.remove(target_idx);

        let mut targets = Vec::with_capacity(self.rows.len());
        for (row_no, row) in self.rows.iter_mut().enumerate() {
            let cell = row.remove(target_idx);
            let value: f64 = cell.trim().parse().map_err(|_| {
                PredictorError::Dataset(format!(
                    "non-numeric '{target}' value '{cell}' in data row {}",
                    row_no + 1
                ))
            })?;
            targets.push(value);
        }

        Ok((self, targets))
    }
}

/// Loads a CSV dataset from a single file path.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the whole file into a RawTable.
    ///
    /// Fails with a dataset error when the file is unreadable, has no
    /// data rows, or contains a row whose width differs from the header.
    pub fn load(&self) -> Result<RawTable> {
        let path: &Path = &self.path;

        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            PredictorError::Dataset(format!("cannot read '{}': {e}", path.display()))
        })?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| {
                PredictorError::Dataset(format!("bad header in '{}': {e}", path.display()))
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (row_no, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                PredictorError::Dataset(format!("bad data row {}: {e}", row_no + 1))
            })?;

            if record.len() != columns.len() {
                return Err(PredictorError::Dataset(format!(
                    "data row {} has {} cells, expected {}",
                    row_no + 1,
                    record.len(),
                    columns.len()
                )));
            }

            rows.push(record.iter().map(|c| c.trim().to_string()).collect());
        }

        if rows.is_empty() {
            return Err(PredictorError::Dataset(format!(
                "'{}' contains no data rows",
                path.display()
            )));
        }

        tracing::info!(
            "Loaded {} rows and {} columns from '{}'",
            rows.len(),
            columns.len(),
            path.display()
        );

        Ok(RawTable { columns, rows })
    }
}
