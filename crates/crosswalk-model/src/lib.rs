//! Canonical data model for the terminology crosswalk.
//!
//! All source vocabularies normalize into [`ConceptRecord`]; the mapping
//! engine produces [`MappingSuggestion`] values against
//! [`ClassificationEntry`] search results.

pub mod classification;
pub mod error;
pub mod interop;
pub mod options;
pub mod record;
pub mod source;
pub mod stats;

pub use classification::{ClassificationEntry, MappingSuggestion, Registry};
pub use error::{CrosswalkError, Result};
pub use interop::InteropPayload;
pub use options::{
    EngineOptions, IndexOptions, MAX_SUGGESTIONS, RESOURCES_ENV_VAR, SuggestionOptions,
};
pub use record::ConceptRecord;
pub use source::SourceSystem;
pub use stats::{CorpusStats, MappingReport};
