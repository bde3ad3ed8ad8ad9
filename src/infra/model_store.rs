// ============================================================
// Layer 6 — Model Store
// ============================================================
// Persists and restores the two training artifacts:
//
//   store_dir/
//     model.json         ← fitted estimator parameters
//     features.json      ← ordered feature-column names
//     train_config.json  ← hyperparameters of the run (sidecar)
//     metrics.json       ← per-candidate evaluation (sidecar)
//
// Both core artifacts are JSON: serde_json round-trips every
// f64 exactly, and the schema file is a flat string list a
// human can read when debugging an alignment problem.
//
// Pair discipline:
//   save() writes both files to temporary names, removes the
//   old model file, then renames schema and model into place.
//   A crash at any point leaves either the old intact pair or
//   a DETECTABLY torn one (one file missing) — never a new
//   schema silently paired with an old model.
//   load() distinguishes "never trained" (both files absent →
//   NotFound) from "torn or corrupt" (anything else → Load).

use std::fs;
use std::path::{Path, PathBuf};

use crate::application::train_use_case::TrainConfig;
use crate::domain::error::{PredictorError, Result};
use crate::domain::schema::FeatureSchema;
use crate::ml::metrics::RegressionReport;
use crate::ml::FittedModel;

const MODEL_FILE: &str = "model.json";
const FEATURES_FILE: &str = "features.json";
const CONFIG_FILE: &str = "train_config.json";
const METRICS_FILE: &str = "metrics.json";

/// File-backed store for one (model, schema) pair.
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist the model and its feature schema as a pair.
    pub fn save(&self, model: &FittedModel, schema: &FeatureSchema) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| PredictorError::Persist(format!("cannot create '{}': {e}", self.dir.display())))?;

        let model_json = serde_json::to_string_pretty(model)
            .map_err(|e| PredictorError::Persist(format!("cannot serialize model: {e}")))?;
        let schema_json = serde_json::to_string_pretty(schema)
            .map_err(|e| PredictorError::Persist(format!("cannot serialize schema: {e}")))?;

        let model_path = self.dir.join(MODEL_FILE);
        let features_path = self.dir.join(FEATURES_FILE);
        let model_tmp = self.dir.join(format!("{MODEL_FILE}.tmp"));
        let features_tmp = self.dir.join(format!("{FEATURES_FILE}.tmp"));

        self.write(&model_tmp, &model_json)?;
        self.write(&features_tmp, &schema_json)?;

        // Break the old pair before installing the new one: a crash from
        // here on leaves one file missing, which load() reports as a torn
        // pair instead of mixing artifacts from two training runs.
        if model_path.exists() {
            fs::remove_file(&model_path)
                .map_err(|e| PredictorError::Persist(format!("cannot replace old model: {e}")))?;
        }
        self.install(&features_tmp, &features_path)?;
        self.install(&model_tmp, &model_path)?;

        tracing::info!(
            "Saved {} model with {} feature columns to '{}'",
            model.name(),
            schema.len(),
            self.dir.display(),
        );
        Ok(())
    }

    /// Restore the persisted pair.
    pub fn load(&self) -> Result<(FittedModel, FeatureSchema)> {
        let model_path = self.dir.join(MODEL_FILE);
        let features_path = self.dir.join(FEATURES_FILE);

        match (model_path.exists(), features_path.exists()) {
            (false, false) => return Err(PredictorError::NotFound(self.dir.clone())),
            (true, true) => {}
            _ => {
                return Err(PredictorError::Load(format!(
                    "torn artifact pair in '{}': model and feature schema \
                     must come from the same training run",
                    self.dir.display(),
                )))
            }
        }

        let model_json = fs::read_to_string(&model_path)
            .map_err(|e| PredictorError::Load(format!("cannot read model: {e}")))?;
        let model: FittedModel = serde_json::from_str(&model_json)
            .map_err(|e| PredictorError::Load(format!("corrupt model file: {e}")))?;

        let schema_json = fs::read_to_string(&features_path)
            .map_err(|e| PredictorError::Load(format!("cannot read feature schema: {e}")))?;
        let columns: Vec<String> = serde_json::from_str(&schema_json)
            .map_err(|e| PredictorError::Load(format!("corrupt feature schema file: {e}")))?;
        // Re-validate on the way in so an empty or duplicated schema file
        // fails here, not as a misaligned prediction later.
        let schema = FeatureSchema::new(columns)?;

        // Both files parsed, but they must also describe the SAME feature
        // space: a model.json copied next to a features.json from another
        // run would otherwise score confidently wrong prices.
        if !model.is_fitted() {
            return Err(PredictorError::Load(
                "model file holds an unfitted estimator".to_string(),
            ));
        }
        if model.n_features() != schema.len() {
            return Err(PredictorError::Load(format!(
                "model expects {} feature columns but the schema lists {}; \
                 the artifacts are not from the same training run",
                model.n_features(),
                schema.len(),
            )));
        }

        tracing::info!(
            "Loaded {} model with {} feature columns from '{}'",
            model.name(),
            schema.len(),
            self.dir.display(),
        );
        Ok((model, schema))
    }

    /// Record the hyperparameters of the run next to the artifacts,
    /// so a store directory is self-describing.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(cfg)
            .map_err(|e| PredictorError::Persist(format!("cannot serialize config: {e}")))?;
        self.write(&self.dir.join(CONFIG_FILE), &json)
    }

    /// Record the per-candidate evaluation next to the artifacts.
    pub fn save_reports(&self, reports: &[RegressionReport]) -> Result<()> {
        let json = serde_json::to_string_pretty(reports)
            .map_err(|e| PredictorError::Persist(format!("cannot serialize metrics: {e}")))?;
        self.write(&self.dir.join(METRICS_FILE), &json)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content)
            .map_err(|e| PredictorError::Persist(format!("cannot write '{}': {e}", path.display())))
    }

    fn install(&self, tmp: &Path, path: &Path) -> Result<()> {
        fs::rename(tmp, path).map_err(|e| {
            PredictorError::Persist(format!("cannot install '{}': {e}", path.display()))
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::FeatureMatrix;
    use crate::ml::linear::LinearRegression;

    fn fitted_pair() -> (FittedModel, FeatureSchema) {
        let x = FeatureMatrix::new(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let model = LinearRegression::fit(&x, &[3.0, 5.0, 7.0, 9.0]).unwrap();
        let schema = FeatureSchema::new(vec!["area".into()]).unwrap();
        (FittedModel::Linear(model), schema)
    }

    #[test]
    fn save_then_load_round_trips_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        let (model, schema) = fitted_pair();

        store.save(&model, &schema).unwrap();
        let (restored_model, restored_schema) = store.load().unwrap();

        assert_eq!(restored_schema, schema);
        assert_eq!(restored_model.predict_row(&[10.0]), model.predict_row(&[10.0]));
    }

    #[test]
    fn load_without_artifacts_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelStore::new(dir.path().join("empty")).load().unwrap_err();
        assert!(matches!(err, PredictorError::NotFound(_)));
    }

    #[test]
    fn corrupt_model_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        let (model, schema) = fitted_pair();
        store.save(&model, &schema).unwrap();

        fs::write(dir.path().join(MODEL_FILE), "not json {{{").unwrap();
        assert!(matches!(store.load().unwrap_err(), PredictorError::Load(_)));
    }

    #[test]
    fn half_a_pair_is_a_load_error_not_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        let (model, schema) = fitted_pair();
        store.save(&model, &schema).unwrap();

        fs::remove_file(dir.path().join(FEATURES_FILE)).unwrap();
        assert!(matches!(store.load().unwrap_err(), PredictorError::Load(_)));
    }

    #[test]
    fn malformed_persisted_schema_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        let (model, schema) = fitted_pair();
        store.save(&model, &schema).unwrap();

        fs::write(dir.path().join(FEATURES_FILE), r#"["area", "area"]"#).unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn mixed_pair_from_different_runs_is_a_load_error() {
        // One-feature model from run A, two-column schema from run B:
        // both files exist and parse, but they must not load as a pair.
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        let (model_a, schema_a) = fitted_pair();
        ModelStore::new(dir_a.path()).save(&model_a, &schema_a).unwrap();

        let schema_b = FeatureSchema::new(vec!["area".into(), "bedrooms".into()]).unwrap();
        let x = FeatureMatrix::new(4, 2, vec![1.0, 0.0, 2.0, 1.0, 3.0, 0.0, 4.0, 1.0]).unwrap();
        let model_b =
            FittedModel::Linear(LinearRegression::fit(&x, &[1.0, 3.0, 3.0, 5.0]).unwrap());
        ModelStore::new(dir_b.path()).save(&model_b, &schema_b).unwrap();

        fs::copy(dir_a.path().join(MODEL_FILE), dir_b.path().join(MODEL_FILE)).unwrap();
        let err = ModelStore::new(dir_b.path()).load().unwrap_err();
        assert!(matches!(err, PredictorError::Load(_)));
    }

    #[test]
    fn unfitted_model_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        let (model, schema) = fitted_pair();
        store.save(&model, &schema).unwrap();

        // Structurally valid JSON, but a forest with no trees.
        fs::write(
            dir.path().join(MODEL_FILE),
            r#"{"kind":"forest","trees":[],"n_estimators":0,"max_depth":10,"min_samples_split":2,"seed":42,"n_features":1}"#,
        )
        .unwrap();
        assert!(matches!(store.load().unwrap_err(), PredictorError::Load(_)));
    }

    #[test]
    fn save_replaces_the_previous_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        let (model, schema) = fitted_pair();
        store.save(&model, &schema).unwrap();

        let second = FeatureSchema::new(vec!["area".into(), "bedrooms".into()]).unwrap();
        let x = FeatureMatrix::new(4, 2, vec![1.0, 0.0, 2.0, 1.0, 3.0, 0.0, 4.0, 1.0]).unwrap();
        let second_model =
            FittedModel::Linear(LinearRegression::fit(&x, &[1.0, 3.0, 3.0, 5.0]).unwrap());

        store.save(&second_model, &second).unwrap();
        let (_, restored) = store.load().unwrap();
        assert_eq!(restored, second);
    }
}
