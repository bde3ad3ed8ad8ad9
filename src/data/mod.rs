// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw CSV file
// all the way to a train/test-partitioned feature matrix.
//
// The pipeline flows in this order:
//
//   housing.csv
//       │
//       ▼
//   CsvLoader       → reads the file into a string table
//       │
//       ▼
//   split_target    → separates the "price" column
//       │
//       ▼
//   SchemaEncoder   → one-hot encodes categorical columns,
//       │             producing the FeatureSchema
//       ▼
//   split_indices   → seeded 80/20 train/test partition
//
// The encoder also runs in reverse at prediction time: it
// expands a single PropertyRecord and aligns the expansion
// against the persisted FeatureSchema.
//
// Each module is responsible for exactly one step, so each
// step is independently testable and replaceable.

/// Loads the labeled CSV dataset into a raw string table
pub mod loader;

/// One-hot encoding and reindex-against-schema alignment
pub mod encoder;

/// Seeded shuffling and train/test index splitting
pub mod splitter;
