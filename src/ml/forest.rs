// ============================================================
// Layer 5 — Random Forest Regressor
// ============================================================
// Ensemble of CART regression trees, each grown on a bootstrap
// sample (random draw with replacement) of the training rows.
// Predictions are the mean over all trees, which trades a
// little bias for a large variance reduction compared to a
// single deep tree.
//
// Splitting criterion: sum of squared errors. For each feature
// the candidate rows are sorted once and the left/right sums
// are maintained incrementally, so evaluating every midpoint
// threshold of a feature costs one O(n log n) sort plus one
// O(n) scan. Leaves predict the mean target of their rows.
//
// Determinism: every stochastic step derives from the
// configured seed (tree i uses seed + i), so a fitted forest
// is a pure function of data + hyperparameters.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::domain::error::{PredictorError, Result};
use crate::domain::schema::FeatureMatrix;

/// A node of a fitted regression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal split: rows with feature <= threshold go left.
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    /// Terminal node predicting the mean target of its training rows.
    Leaf { value: f64, n_samples: usize },
}

impl TreeNode {
    fn predict(&self, row: &[f64]) -> f64 {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { value, .. } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

}

/// Random forest regressor with seeded bootstrap sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    trees: Vec<TreeNode>,
    n_estimators: usize,
    max_depth: usize,
    min_samples_split: usize,
    seed: u64,
    n_features: usize,
}

impl RandomForestRegressor {
    pub fn new(n_estimators: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators,
            max_depth: 10,
            min_samples_split: 2,
            seed: 42,
            n_features: 0,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples.max(2);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Grow all trees, one bootstrap sample each.
    pub fn fit(&mut self, x: &FeatureMatrix, y: &[f64]) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples != y.len() {
            return Err(PredictorError::Training(format!(
                "feature rows ({n_samples}) and targets ({}) disagree",
                y.len()
            )));
        }
        if n_samples == 0 {
            return Err(PredictorError::Training(
                "cannot fit a forest on zero samples".to_string(),
            ));
        }
        if self.n_estimators == 0 {
            return Err(PredictorError::Training(
                "forest needs at least one tree".to_string(),
            ));
        }

        self.n_features = n_features;
        self.trees = Vec::with_capacity(self.n_estimators);
        for i in 0..self.n_estimators {
            let indices = bootstrap_sample(n_samples, self.seed + i as u64);
            let tree = build_tree(
                x,
                y,
                &indices,
                0,
                self.max_depth,
                self.min_samples_split,
            );
            self.trees.push(tree);
        }

        tracing::debug!(
            "Grew {} trees (max_depth={}, min_samples_split={}, seed={})",
            self.trees.len(),
            self.max_depth,
            self.min_samples_split,
            self.seed,
        );

        Ok(())
    }

    /// Score one aligned feature row by averaging over all trees.
    ///
    /// # Panics
    ///
    /// Panics if the forest has not been fitted.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        assert!(!self.trees.is_empty(), "forest not fitted; call fit() first");

        let sum: f64 = self.trees.iter().map(|t| t.predict(row)).sum();
        sum / self.trees.len() as f64
    }

    /// Score every row of a matrix.
    pub fn predict(&self, x: &FeatureMatrix) -> Vec<f64> {
        (0..x.shape().0).map(|i| self.predict_row(x.row(i))).collect()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Number of feature columns the forest was fitted on.
    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

/// Draw `n_samples` indices with replacement, seeded.
fn bootstrap_sample(n_samples: usize, seed: u64) -> Vec<usize> {
    let dist = Uniform::from(0..n_samples);
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_samples).map(|_| dist.sample(&mut rng)).collect()
}

fn mean(y: &[f64], indices: &[usize]) -> f64 {
    indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64
}

/// Sum of squared errors around the mean for the selected rows.
fn sse(y: &[f64], indices: &[usize]) -> f64 {
    let m = mean(y, indices);
    indices.iter().map(|&i| (y[i] - m).powi(2)).sum()
}

/// The best (feature, threshold) pair by SSE reduction, if any split
/// separates the rows at all.
fn best_split(x: &FeatureMatrix, y: &[f64], indices: &[usize]) -> Option<(usize, f64)> {
    let (_, n_features) = x.shape();
    let n = indices.len();
    let parent_sse = sse(y, indices);

    let mut best: Option<(usize, f64)> = None;
    let mut best_gain = 1e-12;

    let total_sum: f64 = indices.iter().map(|&i| y[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| y[i] * y[i]).sum();

    let mut sorted: Vec<(f64, f64)> = Vec::with_capacity(n);
    for feature in 0..n_features {
        sorted.clear();
        sorted.extend(indices.iter().map(|&i| (x.get(i, feature), y[i])));
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        // Walk the sorted rows keeping running left-side sums; every
        // boundary between two distinct feature values is a candidate
        // threshold (their midpoint).
        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for split_at in 1..n {
            let (prev_value, prev_target) = sorted[split_at - 1];
            left_sum += prev_target;
            left_sq += prev_target * prev_target;

            let value = sorted[split_at].0;
            if value <= prev_value {
                continue; // identical feature values cannot be separated
            }

            let n_left = split_at as f64;
            let n_right = (n - split_at) as f64;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;

            // SSE = Σy² − (Σy)²/n, per side
            let child_sse = (left_sq - left_sum * left_sum / n_left)
                + (right_sq - right_sum * right_sum / n_right);
            let gain = parent_sse - child_sse;

            if gain > best_gain {
                best_gain = gain;
                best = Some((feature, (prev_value + value) / 2.0));
            }
        }
    }

    best
}

/// Grow a regression tree over the selected rows, recursively.
fn build_tree(
    x: &FeatureMatrix,
    y: &[f64],
    indices: &[usize],
    depth: usize,
    max_depth: usize,
    min_samples_split: usize,
) -> TreeNode {
    let make_leaf = |indices: &[usize]| TreeNode::Leaf {
        value: mean(y, indices),
        n_samples: indices.len(),
    };

    if indices.len() < min_samples_split || depth >= max_depth || sse(y, indices) < 1e-10 {
        return make_leaf(indices);
    }

    let Some((feature, threshold)) = best_split(x, y, indices) else {
        return make_leaf(indices);
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| x.get(i, feature) <= threshold);

    TreeNode::Split {
        feature,
        threshold,
        left: Box::new(build_tree(x, y, &left_idx, depth + 1, max_depth, min_samples_split)),
        right: Box::new(build_tree(x, y, &right_idx, depth + 1, max_depth, min_samples_split)),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[f64]]) -> FeatureMatrix {
        let n_cols = rows[0].len();
        let data: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        FeatureMatrix::new(rows.len(), n_cols, data).unwrap()
    }

    fn step_data() -> (FeatureMatrix, Vec<f64>) {
        // Step function: y = 10 for x < 5, y = 50 for x >= 5
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let refs: Vec<&[f64]> = rows.iter().map(|r| r.as_slice()).collect();
        let y = (0..10).map(|i| if i < 5 { 10.0 } else { 50.0 }).collect();
        (matrix(&refs), y)
    }

    #[test]
    fn learns_a_step_function() {
        let (x, y) = step_data();
        let mut rf = RandomForestRegressor::new(20).with_max_depth(3).with_seed(42);
        rf.fit(&x, &y).unwrap();

        assert_eq!(rf.n_features(), 1);
        assert!(rf.predict_row(&[1.0]) < 20.0);
        assert!(rf.predict_row(&[8.0]) > 40.0);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let (x, y) = step_data();
        let mut a = RandomForestRegressor::new(10).with_seed(7);
        let mut b = RandomForestRegressor::new(10).with_seed(7);
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();

        for probe in [0.5, 3.2, 6.8, 9.0] {
            assert_eq!(a.predict_row(&[probe]), b.predict_row(&[probe]));
        }
    }

    #[test]
    fn grows_the_requested_number_of_trees() {
        let (x, y) = step_data();
        let mut rf = RandomForestRegressor::new(5).with_max_depth(2).with_seed(1);
        rf.fit(&x, &y).unwrap();
        assert_eq!(rf.n_trees(), 5);
    }

    #[test]
    fn constant_target_yields_constant_prediction() {
        let rows: Vec<Vec<f64>> = (0..8).map(|i| vec![i as f64]).collect();
        let refs: Vec<&[f64]> = rows.iter().map(|r| r.as_slice()).collect();
        let y = vec![7.0; 8];

        let mut rf = RandomForestRegressor::new(5).with_seed(3);
        rf.fit(&matrix(&refs), &y).unwrap();
        assert!((rf.predict_row(&[4.0]) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn zero_samples_is_rejected() {
        let x = FeatureMatrix::new(0, 1, vec![]).unwrap();
        let mut rf = RandomForestRegressor::new(3);
        assert!(rf.fit(&x, &[]).is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let (x, y) = step_data();
        let mut rf = RandomForestRegressor::new(5).with_max_depth(3).with_seed(9);
        rf.fit(&x, &y).unwrap();

        let json = serde_json::to_string(&rf).unwrap();
        let restored: RandomForestRegressor = serde_json::from_str(&json).unwrap();

        for probe in [0.0, 2.5, 7.5] {
            assert_eq!(rf.predict_row(&[probe]), restored.predict_row(&[probe]));
        }
    }
}
