//! Mapping of source terms onto the target classification.
//!
//! [`SuggestionEngine`] scores search results with a word-set Jaccard index
//! and falls back to a keyword table. [`AutoMapper`] applies the top
//! suggestion across a vocabulary when it clears the confidence floor.

pub mod auto_map;
pub mod engine;
pub mod fallback;
pub mod score;
pub mod search;

pub use auto_map::{
    AutoMapOutcome, AutoMapPlan, AutoMapper, DEFAULT_AUTO_MAP_FLOOR, MappingDecision,
    apply_decisions,
};
pub use engine::{SuggestionEngine, SuggestionOrigin, SuggestionSet};
pub use fallback::{FallbackTable, KeywordRule};
pub use score::{MAX_MAPPING_CONFIDENCE, jaccard, mapping_confidence};
pub use search::{
    ClassificationSearch, SearchError, StaticCatalog, TimeoutSearch, UnconfiguredSearch,
};
