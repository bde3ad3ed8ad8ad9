// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// This is the heart of the application — pure Rust structs
// that define the core concepts of the system.
//
// Rules for this layer:
//   - NO file I/O or CSV parsing here
//   - NO regression math here
//   - Only plain Rust structs, enums, and the error taxonomy
//
// Why keep this layer pure?
//   - Easy to unit test (no disk, no fitted model needed)
//   - Easy to understand (no framework noise)
//   - The feature-schema contract is stated in types,
//     not buried inside the pipeline
//
// Think of this layer as the "dictionary" of the system —
// it defines what things ARE, not how they work.

// A single property described by its structural attributes
pub mod record;

// The feature schema contract and the numeric feature matrix
pub mod schema;

// The error taxonomy shared by every other layer
pub mod error;
