// ============================================================
// Layer 5 — Regression Metrics
// ============================================================
// The three numbers reported for every candidate estimator:
//
//   MAE — mean absolute error, in currency units. The most
//         readable of the three: "off by X on average".
//   MSE — mean squared error. Punishes large misses; the
//         quantity OLS actually minimises.
//   R²  — coefficient of determination, 1 − SS_res/SS_tot.
//         1.0 is a perfect fit, 0.0 is "no better than
//         predicting the mean", negative is worse than that.
//
// All three are evaluated on the held-out test partition only.

use serde::{Deserialize, Serialize};

/// MAE = (1/n) · Σ|y_true − y_pred|
pub fn mean_absolute_error(y_pred: &[f64], y_true: &[f64]) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "prediction/target length mismatch");
    assert!(!y_true.is_empty(), "cannot score an empty set");

    let sum: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).abs())
        .sum();
    sum / y_true.len() as f64
}

/// MSE = (1/n) · Σ(y_true − y_pred)²
pub fn mean_squared_error(y_pred: &[f64], y_true: &[f64]) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "prediction/target length mismatch");
    assert!(!y_true.is_empty(), "cannot score an empty set");

    let sum: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    sum / y_true.len() as f64
}

/// R² = 1 − SS_res/SS_tot. Returns 0.0 for a constant target
/// (SS_tot = 0), where the ratio is undefined.
pub fn r_squared(y_pred: &[f64], y_true: &[f64]) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "prediction/target length mismatch");
    assert!(!y_true.is_empty(), "cannot score an empty set");

    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return 0.0;
    }
    1.0 - ss_res / ss_tot
}

/// Test-partition evaluation of one candidate estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionReport {
    pub model: String,
    pub mae: f64,
    pub mse: f64,
    pub r2: f64,
}

impl RegressionReport {
    pub fn evaluate(model: impl Into<String>, y_pred: &[f64], y_true: &[f64]) -> Self {
        Self {
            model: model.into(),
            mae: mean_absolute_error(y_pred, y_true),
            mse: mean_squared_error(y_pred, y_true),
            r2: r_squared(y_pred, y_true),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const Y_TRUE: [f64; 4] = [3.0, -0.5, 2.0, 7.0];
    const Y_PRED: [f64; 4] = [2.5, 0.0, 2.0, 8.0];

    #[test]
    fn mae_known_value() {
        // |0.5| + |0.5| + 0 + |1.0| = 2.0 → /4 = 0.5
        assert!((mean_absolute_error(&Y_PRED, &Y_TRUE) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn mse_known_value() {
        // 0.25 + 0.25 + 0 + 1.0 = 1.5 → /4 = 0.375
        assert!((mean_squared_error(&Y_PRED, &Y_TRUE) - 0.375).abs() < 1e-12);
    }

    #[test]
    fn perfect_prediction_scores_one() {
        assert_eq!(r_squared(&Y_TRUE, &Y_TRUE), 1.0);
    }

    #[test]
    fn r2_is_high_for_close_predictions() {
        assert!(r_squared(&Y_PRED, &Y_TRUE) > 0.9);
    }

    #[test]
    fn constant_target_scores_zero() {
        let y = [5.0, 5.0, 5.0];
        assert_eq!(r_squared(&[4.0, 5.0, 6.0], &y), 0.0);
    }

    #[test]
    fn report_carries_all_three_metrics() {
        let report = RegressionReport::evaluate("linear_regression", &Y_PRED, &Y_TRUE);
        assert_eq!(report.model, "linear_regression");
        assert!(report.mae > 0.0 && report.mse > 0.0 && report.r2 > 0.9);
    }
}
