// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// one goal per use case (training a model, or pricing one
// property).
//
// Rules for this layer:
//   - No regression math here (that's Layer 5)
//   - No argument parsing or printing here (that's Layer 1)
//   - No direct file-format knowledge (that's Layers 4 and 6)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.

// The offline training workflow: load → encode → split →
// fit → evaluate → persist
pub mod train_use_case;

// The online scoring workflow: load artifacts once, then
// validate → encode → align → predict per request
pub mod predict_use_case;
