//! Hand-off contract for the interoperability-record builder.
//!
//! The builder itself lives outside this workspace. It receives exactly the
//! fields below for one accepted mapping.

use serde::{Deserialize, Serialize};

use crate::classification::MappingSuggestion;
use crate::error::{CrosswalkError, Result};
use crate::record::ConceptRecord;
use crate::source::SourceSystem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteropPayload {
    pub code: String,
    pub term_english: String,
    pub term_original: String,
    pub source_system: SourceSystem,
    pub description: String,
    pub target_code: String,
    pub target_term: String,
    pub confidence: u8,
}

impl InteropPayload {
    /// Build the payload for `record` mapped to `accepted`.
    pub fn from_accepted(record: &ConceptRecord, accepted: &MappingSuggestion) -> Result<Self> {
        if record.code.trim().is_empty() {
            return Err(CrosswalkError::validation("code", "record code is empty"));
        }
        if record.term_english.trim().is_empty() {
            return Err(CrosswalkError::validation(
                "term_english",
                format!("record {} has no English term", record.code),
            ));
        }
        if accepted.target_code.trim().is_empty() {
            return Err(CrosswalkError::validation(
                "target_code",
                "accepted mapping has no target code",
            ));
        }
        Ok(Self {
            code: record.code.clone(),
            term_english: record.term_english.clone(),
            term_original: record.term_original.clone(),
            source_system: record.source_system,
            description: record.description.clone(),
            target_code: accepted.target_code.clone(),
            target_term: accepted.target_term.clone(),
            confidence: accepted.confidence,
        })
    }
}
