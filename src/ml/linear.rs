// ============================================================
// Layer 5 — Linear Regression (Ordinary Least Squares)
// ============================================================
// Fits y = Xβ + ε by minimising the residual sum of squares.
//
// Solver: normal equations, β = (XᵀX)⁻¹ Xᵀy. An intercept
// column of ones is prepended to the design matrix, so β[0]
// is the intercept and the rest are feature coefficients.
// XᵀX is symmetric positive definite for a full-rank design
// matrix, which makes Cholesky the right decomposition: solve
// L·Lᵀ·β = Xᵀy by one forward and one backward substitution.
//
// The feature count here is tiny (one column per schema
// entry, ~14 for the housing dataset), so the O(p³) solve is
// effectively free; the O(n·p²) accumulation of XᵀX dominates.

use serde::{Deserialize, Serialize};

use crate::domain::error::{PredictorError, Result};
use crate::domain::schema::FeatureMatrix;

/// A fitted OLS model: one coefficient per schema column plus intercept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Fit on a training matrix and target vector.
    ///
    /// Fails when dimensions disagree, when there are fewer samples than
    /// coefficients to estimate, or when the design matrix is rank
    /// deficient (collinear columns make XᵀX singular).
    pub fn fit(x: &FeatureMatrix, y: &[f64]) -> Result<Self> {
        let (n_samples, n_features) = x.shape();

        if n_samples != y.len() {
            return Err(PredictorError::Training(format!(
                "feature rows ({n_samples}) and targets ({}) disagree",
                y.len()
            )));
        }
        // One unknown per feature plus the intercept.
        if n_samples < n_features + 1 {
            return Err(PredictorError::Training(format!(
                "underdetermined system: {n_samples} samples for {} unknowns",
                n_features + 1
            )));
        }

        // Accumulate A = XᵀX and b = Xᵀy over the design matrix
        // [1 | x_row], without materialising it.
        let p = n_features + 1;
        let mut a = vec![0.0f64; p * p];
        let mut b = vec![0.0f64; p];

        for i in 0..n_samples {
            let row = x.row(i);
            let target = y[i];
            for j in 0..p {
                let xj = if j == 0 { 1.0 } else { row[j - 1] };
                b[j] += xj * target;
                for k in j..p {
                    let xk = if k == 0 { 1.0 } else { row[k - 1] };
                    a[j * p + k] += xj * xk;
                }
            }
        }
        // Mirror the upper triangle; Cholesky below reads the full matrix.
        for j in 0..p {
            for k in 0..j {
                a[j * p + k] = a[k * p + j];
            }
        }

        let beta = cholesky_solve(&a, &b, p)?;

        Ok(Self {
            intercept: beta[0],
            coefficients: beta[1..].to_vec(),
        })
    }

    /// Score one aligned feature row.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, v)| c * v)
                .sum::<f64>()
    }

    /// Score every row of a matrix.
    pub fn predict(&self, x: &FeatureMatrix) -> Vec<f64> {
        (0..x.shape().0).map(|i| self.predict_row(x.row(i))).collect()
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Number of feature columns this model was fitted on.
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

/// Solve A·x = b for symmetric positive definite A (row-major, p×p)
/// via Cholesky factorisation A = L·Lᵀ.
fn cholesky_solve(a: &[f64], b: &[f64], p: usize) -> Result<Vec<f64>> {
    let mut l = vec![0.0f64; p * p];

    for i in 0..p {
        for j in 0..=i {
            let mut sum = a[i * p + j];
            for k in 0..j {
                sum -= l[i * p + k] * l[j * p + k];
            }
            if i == j {
                if sum <= 1e-12 {
                    return Err(PredictorError::Training(
                        "design matrix is singular (collinear feature columns?)".to_string(),
                    ));
                }
                l[i * p + j] = sum.sqrt();
            } else {
                l[i * p + j] = sum / l[j * p + j];
            }
        }
    }

    // Forward substitution: L·z = b
    let mut z = vec![0.0f64; p];
    for i in 0..p {
        let mut sum = b[i];
        for k in 0..i {
            sum -= l[i * p + k] * z[k];
        }
        z[i] = sum / l[i * p + i];
    }

    // Backward substitution: Lᵀ·x = z
    let mut x = vec![0.0f64; p];
    for i in (0..p).rev() {
        let mut sum = z[i];
        for k in (i + 1)..p {
            sum -= l[k * p + i] * x[k];
        }
        x[i] = sum / l[i * p + i];
    }

    Ok(x)
}
