// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// The online half of the system. Construction loads the
// (model, schema) pair from the store ONCE; after that the use
// case is immutable, so one instance can be shared read-only
// across any number of prediction calls. There is no reload
// path — swapping models means building a new use case.
//
// Per call:
//   Step 1: Validate the record        (Layer 3 - domain)
//   Step 2: Inference-mode expansion   (Layer 4 - data)
//   Step 3: Align to the stored schema (Layer 4 - data)
//   Step 4: Score and round            (Layer 5 - ml)
//
// A call either succeeds or fails synchronously; no retries,
// and no fallback price is ever fabricated.

use std::path::PathBuf;

use crate::data::encoder::SchemaEncoder;
use crate::domain::error::Result;
use crate::domain::record::PropertyRecord;
use crate::domain::schema::FeatureSchema;
use crate::infra::model_store::ModelStore;
use crate::ml::FittedModel;

/// The result of pricing one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceEstimate {
    /// Estimated sale price, whole currency units, never negative.
    pub price: u64,
    /// Derived metric: price divided by area, floored.
    pub price_per_sqft: u64,
}

#[derive(Debug)]
pub struct PredictUseCase {
    model: FittedModel,
    schema: FeatureSchema,
    encoder: SchemaEncoder,
}

impl PredictUseCase {
    /// Load the persisted artifacts and build a ready-to-score use case.
    /// Fails with NotFound when nothing has been trained yet.
    pub fn new(model_dir: impl Into<PathBuf>) -> Result<Self> {
        let (model, schema) = ModelStore::new(model_dir).load()?;
        Ok(Self {
            model,
            schema,
            encoder: SchemaEncoder::new(),
        })
    }

    /// Price one property.
    pub fn predict(&self, record: &PropertyRecord) -> Result<PriceEstimate> {
        // ── Step 1: Validate before encoding ──────────────────────────────────
        record.validate()?;

        // ── Steps 2+3: Expand and align ───────────────────────────────────────
        // The aligned row has exactly schema.len() values in schema order;
        // unseen categorical values have already degraded to all-zero
        // indicators by this point.
        let expansion = self.encoder.expand_record(record);
        let row = self.encoder.align(&expansion, &self.schema);

        // ── Step 4: Score ─────────────────────────────────────────────────────
        let raw = self.model.predict_row(&row);
        let price = raw.round().max(0.0) as u64;

        // area > 0 is guaranteed by validation above
        let price_per_sqft = (price as f64 / record.area) as u64;

        tracing::debug!(
            "Scored record (area={}) with {}: raw={:.2} → {}",
            record.area,
            self.model.name(),
            raw,
            price,
        );

        Ok(PriceEstimate { price, price_per_sqft })
    }

    /// The schema this predictor aligns every record against.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }
}
