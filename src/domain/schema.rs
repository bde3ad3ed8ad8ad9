// ============================================================
// Layer 3 — Feature Schema and Feature Matrix
// ============================================================
// FeatureSchema is the single load-bearing contract of this
// system: the ordered list of column names produced by
// training-time encoding. Every feature row handed to a fitted
// model must match it exactly — same columns, same order.
//
// The constructor is the only way to build a schema, so a
// schema in hand is always non-empty with unique names. The
// model store re-runs this constructor when restoring from
// disk, which is how a malformed persisted schema surfaces
// as an error instead of silently misaligned predictions.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::error::{PredictorError, Result};

/// The ordered feature-column names a fitted model expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Build a schema from encoder output, rejecting empty or
    /// duplicate-name column lists.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            return Err(PredictorError::SchemaMismatch(
                "schema has no columns".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(PredictorError::SchemaMismatch(format!(
                    "duplicate column name '{name}'"
                )));
            }
        }

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Dense row-major matrix of encoded feature values.
///
/// The numeric carrier between the encoder, the splitter and the
/// estimators. Row `i` is one sample; column `j` corresponds to
/// `schema.columns()[j]` of the schema it was encoded against.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    pub fn new(n_rows: usize, n_cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != n_rows * n_cols {
            return Err(PredictorError::SchemaMismatch(format!(
                "matrix data length {} does not match shape {n_rows}x{n_cols}",
                data.len()
            )));
        }
        Ok(Self { n_rows, n_cols, data })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n_cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.n_cols;
        &self.data[start..start + self.n_cols]
    }

    /// Copy out the rows at `indices`, in the given order.
    /// Used by the splitter to materialise train/test partitions.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let mut data = Vec::with_capacity(indices.len() * self.n_cols);
        for &i in indices {
            data.extend_from_slice(self.row(i));
        }
        Self {
            n_rows: indices.len(),
            n_cols: self.n_cols,
            data,
        }
    }
}
