// ============================================================
// Layer 5 — Candidate Training
// ============================================================
// Fits both candidate estimators on the train partition and
// evaluates each on the held-out test partition:
//
//   1. OLS linear regression        (closed-form, no knobs)
//   2. Random-forest regressor      (n_estimators, max_depth,
//                                    min_samples_split, seed)
//
// Both candidates always run so their metrics can be compared
// side by side. Which one gets persisted is the application
// layer's decision, not this module's.

use crate::application::train_use_case::TrainConfig;
use crate::domain::error::{PredictorError, Result};
use crate::domain::schema::FeatureMatrix;
use crate::ml::forest::RandomForestRegressor;
use crate::ml::linear::LinearRegression;
use crate::ml::metrics::RegressionReport;

/// Everything a training run produces before persistence.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub linear: LinearRegression,
    pub forest: RandomForestRegressor,
    pub reports: Vec<RegressionReport>,
}

/// Fit and evaluate both candidates.
pub fn run_training(
    cfg: &TrainConfig,
    x_train: &FeatureMatrix,
    y_train: &[f64],
    x_test: &FeatureMatrix,
    y_test: &[f64],
) -> Result<TrainingOutcome> {
    // Metrics are only defined over non-empty partitions; a tiny dataset
    // (or test_size 0) must surface here as an error, not downstream.
    if y_train.is_empty() || y_test.is_empty() {
        return Err(PredictorError::Training(format!(
            "degenerate split: {} training rows, {} test rows; both partitions need at least one",
            y_train.len(),
            y_test.len()
        )));
    }

    // ── Candidate 1: linear regression ────────────────────────────────────────
    tracing::info!("Fitting linear regression on {} samples", y_train.len());
    let linear = LinearRegression::fit(x_train, y_train)?;
    let linear_report =
        RegressionReport::evaluate("linear_regression", &linear.predict(x_test), y_test);

    // ── Candidate 2: random forest ────────────────────────────────────────────
    tracing::info!(
        "Fitting random forest ({} trees, max_depth={})",
        cfg.n_estimators,
        cfg.max_depth,
    );
    let mut forest = RandomForestRegressor::new(cfg.n_estimators)
        .with_max_depth(cfg.max_depth)
        .with_min_samples_split(cfg.min_samples_split)
        .with_seed(cfg.seed);
    forest.fit(x_train, y_train)?;
    let forest_report =
        RegressionReport::evaluate("random_forest", &forest.predict(x_test), y_test);

    // ── Comparison summary ────────────────────────────────────────────────────
    for report in [&linear_report, &forest_report] {
        println!(
            "{:<18} | mae={:>14.2} | mse={:>20.2} | r2={:.4}",
            report.model, report.mae, report.mse, report.r2,
        );
    }

    Ok(TrainingOutcome {
        linear,
        forest,
        reports: vec![linear_report, forest_report],
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic() -> (FeatureMatrix, Vec<f64>) {
        // y = 100a + 10b + 50 with two independent features
        let n = 30;
        let mut data = Vec::new();
        let mut y = Vec::new();
        for i in 0..n {
            let a = i as f64;
            let b = (i % 7) as f64;
            data.extend_from_slice(&[a, b]);
            y.push(100.0 * a + 10.0 * b + 50.0);
        }
        (FeatureMatrix::new(n, 2, data).unwrap(), y)
    }

    fn config() -> TrainConfig {
        TrainConfig {
            n_estimators: 5,
            max_depth: 4,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn produces_a_report_per_candidate() {
        let (x, y) = synthetic();
        let outcome = run_training(&config(), &x, &y, &x, &y).unwrap();
        assert_eq!(outcome.reports.len(), 2);
        assert_eq!(outcome.reports[0].model, "linear_regression");
        assert_eq!(outcome.reports[1].model, "random_forest");
    }

    #[test]
    fn linear_candidate_nails_a_linear_target() {
        let (x, y) = synthetic();
        let outcome = run_training(&config(), &x, &y, &x, &y).unwrap();
        assert!(outcome.reports[0].r2 > 0.999);
    }

    #[test]
    fn empty_test_partition_is_an_error_not_a_panic() {
        let (x, y) = synthetic();
        let empty_x = FeatureMatrix::new(0, 2, vec![]).unwrap();
        let err = run_training(&config(), &x, &y, &empty_x, &[]).unwrap_err();
        assert!(matches!(err, PredictorError::Training(_)));
    }

    #[test]
    fn rerun_reports_identical_metrics() {
        let (x, y) = synthetic();
        let first = run_training(&config(), &x, &y, &x, &y).unwrap();
        let second = run_training(&config(), &x, &y, &x, &y).unwrap();
        for (a, b) in first.reports.iter().zip(&second.reports) {
            assert_eq!(a.mae, b.mae);
            assert_eq!(a.mse, b.mse);
            assert_eq!(a.r2, b.r2);
        }
    }
}
