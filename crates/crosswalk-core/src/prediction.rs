//! Presentation shape of a ranked record.

use crosswalk_index::RankedHit;
use crosswalk_model::{ConceptRecord, SourceSystem};
use serde::Serialize;

/// One ranked record, shaped for presentation.
///
/// Only the clamped confidence is exposed; the raw cosine stays on
/// [`RankedHit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub code: String,
    pub term_original: String,
    pub term_english: String,
    pub source_system: SourceSystem,
    /// Absent while the record is unmapped.
    pub target_code: Option<String>,
    pub target_term: Option<String>,
    pub confidence: u8,
    pub description: String,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl Prediction {
    pub fn new(record: &ConceptRecord, hit: &RankedHit) -> Self {
        Self {
            code: record.code.clone(),
            term_original: record.term_original.clone(),
            term_english: record.term_english.clone(),
            source_system: record.source_system,
            target_code: non_empty(&record.target_code),
            target_term: non_empty(&record.target_term),
            confidence: hit.confidence,
            description: record.description.clone(),
        }
    }
}
