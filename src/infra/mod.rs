// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns:
//
//   model_store.rs — Saving and restoring the fitted model
//                    together with its feature schema. The two
//                    artifacts are only meaningful as a pair
//                    (a model scored against the wrong schema
//                    produces confidently wrong prices), so
//                    the store treats them as one unit: saves
//                    are all-or-nothing and loads reject a
//                    torn pair.
//
// Why is this a separate layer?
//   The application layer decides WHAT to persist; this layer
//   owns HOW and WHERE. Swapping JSON files for an object
//   store would touch only this module.

/// Atomic persistence of the (model, schema) pair
pub mod model_store;
