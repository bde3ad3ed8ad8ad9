// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the labeled CSV       (Layer 4 - data)
//   Step 2: Split off the target       (Layer 4 - data)
//   Step 3: One-hot encode features    (Layer 4 - data)
//           → this fixes the FeatureSchema
//   Step 4: Seeded train/test split    (Layer 4 - data)
//   Step 5: Fit + evaluate candidates  (Layer 5 - ml)
//   Step 6: Persist model + schema     (Layer 6 - infra)
//
// Determinism contract: every stochastic step derives from
// cfg.seed, so re-running on identical input yields an
// identical schema, identical metrics and identical artifacts.
//
// Persistence happens only after every fallible step has
// succeeded — an aborted run never leaves partial artifacts.

use serde::{Deserialize, Serialize};

use crate::data::encoder::SchemaEncoder;
use crate::data::loader::CsvLoader;
use crate::data::splitter::split_indices;
use crate::domain::error::Result;
use crate::infra::model_store::ModelStore;
use crate::ml::trainer::run_training;
use crate::ml::FittedModel;

/// Name of the target column in the training CSV.
const TARGET_COLUMN: &str = "price";

/// Which fitted candidate the store receives.
///
/// The default follows the original workflow: the linear model is
/// persisted and the forest is fitted for comparison only. Either way
/// the choice is fixed up front, never derived from the metrics at
/// run time, so a training run is fully reproducible from its config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelChoice {
    Linear,
    Forest,
}

// ─── Training Configuration ──────────────────────────────────────────────────
// All knobs of a training run. Serialisable so the store can drop a
// train_config.json next to the artifacts, making every run
// self-describing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub dataset_path: String,
    pub model_dir: String,
    pub test_size: f64,
    pub seed: u64,
    pub n_estimators: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub persist: ModelChoice,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_path: "data/housing.csv".to_string(),
            model_dir: "model".to_string(),
            test_size: 0.2,
            seed: 42,
            n_estimators: 300,
            max_depth: 10,
            min_samples_split: 5,
            persist: ModelChoice::Linear,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load the labeled dataset ──────────────────────────────────
        tracing::info!("Loading dataset from '{}'", cfg.dataset_path);
        let table = CsvLoader::new(&cfg.dataset_path).load()?;

        // ── Step 2: Separate target from features ─────────────────────────────
        let (features, targets) = table.split_target(TARGET_COLUMN)?;

        // ── Step 3: Training-mode encoding ────────────────────────────────────
        // The column order produced here IS the feature schema the
        // predictor will align against for the lifetime of this model.
        let encoder = SchemaEncoder::new();
        let (matrix, schema) = encoder.fit_transform(&features)?;
        tracing::info!("Feature schema has {} columns", schema.len());

        // ── Step 4: Seeded train/test split ───────────────────────────────────
        let (train_idx, test_idx) = split_indices(matrix.shape().0, cfg.test_size, cfg.seed);
        let x_train = matrix.select_rows(&train_idx);
        let x_test = matrix.select_rows(&test_idx);
        let y_train: Vec<f64> = train_idx.iter().map(|&i| targets[i]).collect();
        let y_test: Vec<f64> = test_idx.iter().map(|&i| targets[i]).collect();
        tracing::info!("Split: {} train rows, {} test rows", y_train.len(), y_test.len());

        // ── Step 5: Fit and evaluate both candidates ──────────────────────────
        let outcome = run_training(cfg, &x_train, &y_train, &x_test, &y_test)?;

        // ── Step 6: Persist the chosen model with its schema ──────────────────
        let chosen = match cfg.persist {
            ModelChoice::Linear => FittedModel::Linear(outcome.linear),
            ModelChoice::Forest => FittedModel::Forest(outcome.forest),
        };
        let store = ModelStore::new(&cfg.model_dir);
        store.save(&chosen, &schema)?;
        store.save_config(cfg)?;
        store.save_reports(&outcome.reports)?;

        Ok(())
    }
}
