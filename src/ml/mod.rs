// ============================================================
// Layer 5 — ML / Estimator Layer
// ============================================================
// All regression math lives here. No other layer computes a
// coefficient, a split threshold, or a metric.
//
// What's in this layer:
//
//   linear.rs  — Ordinary Least Squares linear regression
//                β = (XᵀX)⁻¹ Xᵀy via normal equations solved
//                with a Cholesky decomposition
//
//   forest.rs  — Random-forest regressor: CART regression
//                trees (MSE splitting criterion) averaged over
//                seeded bootstrap samples
//
//   metrics.rs — MAE, MSE, R² and the per-candidate report
//
//   trainer.rs — Fits both candidate estimators on the train
//                partition and evaluates them on the test
//                partition
//
// Why isolate the math here?
//   - The data layer stays testable with plain string tables
//   - Swapping an estimator touches exactly one file
//   - The application layer only sees FittedModel

use serde::{Deserialize, Serialize};

/// OLS linear regression
pub mod linear;

/// CART regression trees and the bootstrap-averaged forest
pub mod forest;

/// Regression evaluation metrics
pub mod metrics;

/// Candidate fitting and evaluation
pub mod trainer;

use forest::RandomForestRegressor;
use linear::LinearRegression;

/// A fitted regression estimator, ready to score aligned feature rows.
///
/// This is the opaque object the model store persists: the serialized
/// form round-trips every internal parameter exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FittedModel {
    Linear(LinearRegression),
    Forest(RandomForestRegressor),
}

impl FittedModel {
    /// Score one feature row. The row MUST be aligned to the schema the
    /// model was trained with — same columns, same order.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        match self {
            Self::Linear(model) => model.predict_row(row),
            Self::Forest(model) => model.predict_row(row),
        }
    }

    /// Short display name for logs and the metrics report.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear_regression",
            Self::Forest(_) => "random_forest",
        }
    }

    /// Number of feature columns the estimator was fitted on. The store
    /// checks this against the persisted schema so a model cannot be
    /// loaded against feature columns it was never trained with.
    pub fn n_features(&self) -> usize {
        match self {
            Self::Linear(model) => model.n_features(),
            Self::Forest(model) => model.n_features(),
        }
    }

    /// Whether the estimator carries any fitted parameters at all.
    pub fn is_fitted(&self) -> bool {
        match self {
            Self::Linear(model) => model.n_features() > 0,
            Self::Forest(model) => model.n_trees() > 0,
        }
    }
}
