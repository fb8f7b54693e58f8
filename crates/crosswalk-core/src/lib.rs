//! Terminology normalization and mapping engine.
//!
//! [`TerminologyEngine`] owns the loaded corpus and its lexical index and
//! exposes prediction, search, mapping suggestion and auto-mapping over them.

pub mod engine;
pub mod prediction;

pub use engine::{DEFAULT_TOP_K, Snapshot, TerminologyEngine};
pub use prediction::Prediction;
