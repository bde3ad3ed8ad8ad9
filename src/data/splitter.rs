// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles row indices and splits them into two partitions:
//   - Training set: used to fit the estimators
//   - Test set:     used to measure performance on unseen data
//
// Why shuffle before splitting?
//   Housing records are often ordered by price or by
//   neighbourhood. Without shuffling, the test set would only
//   contain one slice of the market and the metrics would lie.
//
// Why a fixed seed?
//   Re-running training on identical input must yield an
//   identical split and identical metrics. The shuffle uses a
//   seeded StdRng, never the thread RNG.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom,
// the standard unbiased shuffle algorithm.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffle `0..n_rows` with the given seed and split into
/// (train_indices, test_indices).
///
/// # Arguments
/// * `n_rows`        - Total number of samples
/// * `test_fraction` - Proportion held out for testing, e.g. 0.2 = 20%
/// * `seed`          - RNG seed; same seed + same n_rows = same split
pub fn split_indices(n_rows: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n_rows).collect();

    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    // e.g. 545 rows * 0.2 = 109 test rows; clamp for tiny datasets
    let n_test = ((n_rows as f64) * test_fraction).round() as usize;
    let n_test = n_test.min(n_rows);

    let test = indices.split_off(n_rows - n_test);

    tracing::debug!(
        "Dataset split: {} training, {} test (seed {})",
        indices.len(),
        test.len(),
        seed,
    );

    (indices, test)
}
