//! Vocabulary ingestion for the terminology crosswalk.
//!
//! Reads source vocabulary tables, maps each vocabulary's column layout onto
//! [`crosswalk_model::ConceptRecord`], and writes mapped targets back either
//! into the source file or in the canonical layout.

pub mod csv_table;
pub mod error;
pub mod layout;
pub mod loader;
pub mod normalizer;
pub mod writer;

pub use csv_table::{CsvTable, read_csv_from_reader, read_csv_table};
pub use error::{IngestError, Result};
pub use layout::{CANONICAL_HEADERS, ResolvedColumns, VocabularyLayout};
pub use loader::{LoadReport, VocabularyLoad, VocabularyOutcome, load_vocabularies, vocabulary_path};
pub use normalizer::{
    NormalizedVocabulary, merge_records, merge_vocabularies, normalize_table,
    validate_canonical_table,
};
pub use writer::{
    apply_targets, update_vocabulary_targets, write_table_csv, write_vocabulary,
    write_vocabulary_csv,
};
