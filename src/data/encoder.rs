// ============================================================
// Layer 4 — Schema Encoder
// ============================================================
// Converts raw records (mixed numeric + categorical fields)
// into fixed-width numeric feature rows via one-hot encoding.
//
// The encoder runs in two modes, and the asymmetry between
// them is the whole point of this module:
//
//   Training:  each categorical column expands into one
//              indicator column per value of its SORTED
//              domain, with the FIRST value dropped as the
//              reference category (a redundant column would
//              make the design matrix collinear). The
//              resulting column order IS the FeatureSchema.
//
//   Inference: a single record expands with NO value dropped
//              a priori — at this point nobody knows which
//              value was the reference.
//
// Alignment reconciles the two: reindex any expansion against
// the stored schema, zero-filling schema columns missing from
// the expansion and silently dropping expansion columns the
// schema doesn't know. A categorical value never seen during
// training therefore contributes all-zero indicators rather
// than raising an error. That silent zero-fill is documented,
// accepted behavior — do not "fix" it without new requirements.

use std::collections::{BTreeSet, HashMap};

use crate::data::loader::RawTable;
use crate::domain::error::Result;
use crate::domain::record::PropertyRecord;
use crate::domain::schema::{FeatureMatrix, FeatureSchema};

/// Indicator column name for categorical `field` taking `value`.
fn indicator_name(field: &str, value: &str) -> String {
    format!("{field}_{value}")
}

/// One column of the training table, after dtype inference.
enum ColumnPlan {
    /// Every cell parsed as a number; passes through unchanged.
    Numeric { name: String, values: Vec<f64> },
    /// Expands into indicators over the sorted domain minus the
    /// first (reference) value.
    Categorical { name: String, domain: Vec<String> },
}

/// Stateless encoder implementing both encoding modes plus alignment.
#[derive(Debug)]
pub struct SchemaEncoder;

impl SchemaEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Training-mode encoding of a whole feature table.
    ///
    /// Returns the encoded matrix together with the schema its columns
    /// follow: numeric columns first in table order, then per categorical
    /// column (in table order) one indicator per non-reference domain value.
    pub fn fit_transform(&self, table: &RawTable) -> Result<(FeatureMatrix, FeatureSchema)> {
        let n_rows = table.rows.len();

        // ── Pass 1: infer a plan per column ──────────────────────────────────
        // A column is numeric iff every cell parses as f64; anything else
        // is treated as categorical over its sorted set of distinct values.
        let mut plans = Vec::with_capacity(table.columns.len());
        for (col_idx, name) in table.columns.iter().enumerate() {
            let cells: Vec<&str> = table.rows.iter().map(|r| r[col_idx].as_str()).collect();

            let parsed: Option<Vec<f64>> = cells.iter().map(|c| c.parse::<f64>().ok()).collect();
            match parsed {
                Some(values) => plans.push(ColumnPlan::Numeric {
                    name: name.clone(),
                    values,
                }),
                None => {
                    let domain: Vec<String> = cells
                        .iter()
                        .map(|c| c.to_string())
                        .collect::<BTreeSet<_>>()
                        .into_iter()
                        .collect();
                    plans.push(ColumnPlan::Categorical {
                        name: name.clone(),
                        domain,
                    });
                }
            }
        }

        // ── Pass 2: lay out the schema ────────────────────────────────────────
        // Numeric columns first, in table order, then one indicator block
        // per categorical column (also in table order). The raw table may
        // interleave the two kinds (parking sits after six yes/no columns
        // in the housing dataset); the schema never does.
        let mut schema_columns = Vec::new();
        for plan in &plans {
            if let ColumnPlan::Numeric { name, .. } = plan {
                schema_columns.push(name.clone());
            }
        }
        for plan in &plans {
            if let ColumnPlan::Categorical { name, domain } = plan {
                // domain[0] is the dropped reference category
                for value in domain.iter().skip(1) {
                    schema_columns.push(indicator_name(name, value));
                }
            }
        }
        let schema = FeatureSchema::new(schema_columns)?;

        // ── Pass 3: materialise the matrix, row-major ─────────────────────────
        // Same two sweeps as Pass 2 so every row follows the schema layout.
        let n_cols = schema.len();
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row_idx in 0..n_rows {
            for plan in &plans {
                if let ColumnPlan::Numeric { values, .. } = plan {
                    data.push(values[row_idx]);
                }
            }
            for (col_idx, plan) in plans.iter().enumerate() {
                if let ColumnPlan::Categorical { domain, .. } = plan {
                    let cell = &table.rows[row_idx][col_idx];
                    for value in domain.iter().skip(1) {
                        data.push(if cell == value { 1.0 } else { 0.0 });
                    }
                }
            }
        }

        tracing::debug!(
            "Encoded {} rows into {} feature columns ({} raw columns)",
            n_rows,
            n_cols,
            table.columns.len()
        );

        let matrix = FeatureMatrix::new(n_rows, n_cols, data)?;
        Ok((matrix, schema))
    }

    /// Inference-mode expansion of one record: numeric fields pass through,
    /// each categorical field contributes exactly one indicator set to 1.
    /// No reference category is dropped here — alignment handles that.
    pub fn expand_record(&self, record: &PropertyRecord) -> Vec<(String, f64)> {
        let mut expansion: Vec<(String, f64)> = record
            .numeric_fields()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();

        for (field, value) in record.categorical_fields() {
            expansion.push((indicator_name(field, value), 1.0));
        }

        expansion
    }

    /// Reindex an expansion against the stored schema.
    ///
    /// Schema columns absent from the expansion are filled with 0 (this is
    /// what zeroes both the reference category and any unseen value);
    /// expansion columns absent from the schema are silently dropped.
    /// The result always has exactly `schema.len()` values in schema order.
    pub fn align(&self, expansion: &[(String, f64)], schema: &FeatureSchema) -> Vec<f64> {
        let by_name: HashMap<&str, f64> = expansion
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();

        schema
            .columns()
            .iter()
            .map(|column| by_name.get(column.as_str()).copied().unwrap_or(0.0))
            .collect()
    }
}

impl Default for SchemaEncoder {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    fn sample_record() -> PropertyRecord {
        PropertyRecord {
            area: 7420.0,
            bedrooms: 4,
            bathrooms: 2,
            stories: 2,
            parking: 2,
            mainroad: "yes".into(),
            guestroom: "no".into(),
            basement: "yes".into(),
            hotwaterheating: "no".into(),
            airconditioning: "yes".into(),
            prefarea: "yes".into(),
            furnishingstatus: "furnished".into(),
        }
    }

    #[test]
    fn training_encoding_drops_first_sorted_category() {
        let t = table(
            &["area", "furnishingstatus"],
            &[
                &["100", "furnished"],
                &["200", "unfurnished"],
                &["300", "semi-furnished"],
            ],
        );
        let (matrix, schema) = SchemaEncoder::new().fit_transform(&t).unwrap();

        // sorted domain: furnished < semi-furnished < unfurnished,
        // so "furnished" is the dropped reference
        assert_eq!(
            schema.columns(),
            &[
                "area",
                "furnishingstatus_semi-furnished",
                "furnishingstatus_unfurnished"
            ]
        );
        assert_eq!(matrix.row(0), &[100.0, 0.0, 0.0]); // furnished → all zero
        assert_eq!(matrix.row(1), &[200.0, 0.0, 1.0]);
        assert_eq!(matrix.row(2), &[300.0, 1.0, 0.0]);
    }

    #[test]
    fn numeric_columns_precede_indicators() {
        let t = table(
            &["mainroad", "area"],
            &[&["yes", "10"], &["no", "20"]],
        );
        let (matrix, schema) = SchemaEncoder::new().fit_transform(&t).unwrap();
        assert_eq!(schema.columns(), &["area", "mainroad_yes"]);
        // The matrix must follow the schema layout, not the table layout.
        assert_eq!(matrix.row(0), &[10.0, 1.0]);
        assert_eq!(matrix.row(1), &[20.0, 0.0]);
    }

    #[test]
    fn interleaved_table_columns_encode_numeric_block_first() {
        // Mirrors the housing CSV, where "parking" comes after the
        // yes/no columns: numeric columns keep table order up front,
        // indicator blocks follow.
        let t = table(
            &["basement", "area", "parking"],
            &[&["yes", "10", "1"], &["no", "20", "0"]],
        );
        let (matrix, schema) = SchemaEncoder::new().fit_transform(&t).unwrap();
        assert_eq!(schema.columns(), &["area", "parking", "basement_yes"]);
        assert_eq!(matrix.row(0), &[10.0, 1.0, 1.0]);
        assert_eq!(matrix.row(1), &[20.0, 0.0, 0.0]);
    }

    #[test]
    fn aligned_expansion_matches_schema_exactly() {
        let encoder = SchemaEncoder::new();
        let record = sample_record();
        let expansion = encoder.expand_record(&record);

        let schema = FeatureSchema::new(vec![
            "area".into(),
            "bedrooms".into(),
            "mainroad_yes".into(),
            "basement_yes".into(),
            "furnishingstatus_semi-furnished".into(),
            "furnishingstatus_unfurnished".into(),
        ])
        .unwrap();

        let row = encoder.align(&expansion, &schema);
        assert_eq!(row.len(), schema.len());
        //                   area    bedrooms main  base  semi  unf
        assert_eq!(row, vec![7420.0, 4.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn unseen_category_contributes_no_signal() {
        let encoder = SchemaEncoder::new();
        let mut record = sample_record();
        record.furnishingstatus = "palatial".into(); // never in training data

        let schema = FeatureSchema::new(vec![
            "area".into(),
            "furnishingstatus_semi-furnished".into(),
            "furnishingstatus_unfurnished".into(),
        ])
        .unwrap();

        // No error: the unknown indicator is dropped, the known ones zero-fill.
        let row = encoder.align(&encoder.expand_record(&record), &schema);
        assert_eq!(row, vec![7420.0, 0.0, 0.0]);
    }

    #[test]
    fn expansion_columns_outside_schema_are_dropped() {
        let encoder = SchemaEncoder::new();
        let expansion = vec![("area".to_string(), 50.0), ("rogue".to_string(), 9.0)];
        let schema = FeatureSchema::new(vec!["area".into()]).unwrap();
        assert_eq!(encoder.align(&expansion, &schema), vec![50.0]);
    }

    #[test]
    fn yes_no_columns_expand_to_single_indicator() {
        let t = table(
            &["basement"],
            &[&["yes"], &["no"], &["yes"]],
        );
        let (matrix, schema) = SchemaEncoder::new().fit_transform(&t).unwrap();
        // sorted: no < yes, so "no" is the reference
        assert_eq!(schema.columns(), &["basement_yes"]);
        assert_eq!(matrix.row(0), &[1.0]);
        assert_eq!(matrix.row(1), &[0.0]);
    }
}
