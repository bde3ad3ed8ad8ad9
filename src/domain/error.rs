// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure mode the pipeline can surface, in one enum.
// All of these are terminal for the current operation —
// nothing in this system retries internally.
//
// The split between NotFound and Load matters to callers:
//   NotFound → the user simply hasn't trained yet
//   Load     → artifacts exist but are corrupt or torn,
//              which is a real fault, not a missing step

use std::path::PathBuf;
use thiserror::Error;

/// Failure modes of the training and prediction pipelines.
#[derive(Debug, Error)]
pub enum PredictorError {
    /// The training dataset is unreadable, empty, or missing the target column.
    #[error("dataset error: {0}")]
    Dataset(String),

    /// The feature schema is empty or contains duplicate column names.
    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    /// No persisted model/schema pair exists at the store directory.
    #[error("no trained model found in '{0}' — run the `train` command first")]
    NotFound(PathBuf),

    /// Persisted artifacts exist but could not be restored.
    #[error("cannot load persisted artifacts: {0}")]
    Load(String),

    /// Writing artifacts to the store failed.
    #[error("cannot persist artifacts: {0}")]
    Persist(String),

    /// A prediction input field failed validation.
    /// Carries the FIRST violated field so the caller can point at it.
    #[error("invalid value for field '{field}': {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// An estimator could not be fitted (singular system, empty partition, ...).
    #[error("training failed: {0}")]
    Training(String),
}

impl PredictorError {
    /// The offending field name, for Validation errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictorError>;
