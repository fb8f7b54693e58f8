//! Canonical concept record.
//!
//! Every source vocabulary is normalized into [`ConceptRecord`]. Optional
//! fields are always present as (possibly empty) strings so concatenation and
//! serialization never need to special-case absence.

use serde::{Deserialize, Serialize};

use crate::source::SourceSystem;

/// One coded concept from a source vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptRecord {
    /// Vocabulary code, unique within its source vocabulary.
    pub code: String,
    /// Native-script label (Devanagari, Tamil, Arabic). May be empty.
    pub term_original: String,
    /// English label. Never empty for records in a corpus.
    pub term_english: String,
    pub description: String,
    /// Free-form grouping (ontology branch or vocabulary name).
    pub category: String,
    pub source_system: SourceSystem,
    /// Classification code, empty until mapped.
    pub target_code: String,
    /// Classification title, empty until mapped.
    pub target_term: String,
}

impl ConceptRecord {
    /// Create an unmapped record with empty optional fields.
    pub fn new(
        source_system: SourceSystem,
        code: impl Into<String>,
        term_english: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            term_original: String::new(),
            term_english: term_english.into(),
            description: String::new(),
            category: String::new(),
            source_system,
            target_code: String::new(),
            target_term: String::new(),
        }
    }

    pub fn with_original(mut self, term_original: impl Into<String>) -> Self {
        self.term_original = term_original.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_target(mut self, code: impl Into<String>, term: impl Into<String>) -> Self {
        self.target_code = code.into();
        self.target_term = term.into();
        self
    }

    /// Corpus-wide identity: `(source_system, code)`.
    pub fn key(&self) -> (SourceSystem, &str) {
        (self.source_system, self.code.as_str())
    }

    pub fn is_mapped(&self) -> bool {
        !self.target_code.is_empty()
    }

    /// Text fed to the lexical index. Target fields are deliberately absent.
    pub fn indexed_text(&self) -> String {
        format!("{} {} {}", self.term_english, self.description, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_text_excludes_target_fields() {
        let record = ConceptRecord::new(SourceSystem::Ayurveda, "AAA-1", "digestive fire imbalance")
            .with_category("Digestive")
            .with_target("DA00", "Disorders of the digestive system");
        let text = record.indexed_text();
        assert!(text.contains("digestive fire imbalance"));
        assert!(text.contains("Digestive"));
        assert!(!text.contains("DA00"));
        assert!(record.is_mapped());
    }
}
