//! Target classification types: search results and mapping suggestions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Branch of the target classification that produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Registry {
    /// ICD-11 Foundation component.
    #[serde(rename = "ICD-11 Foundation")]
    Foundation,
    /// Traditional Medicine chapter (TM2) linearization.
    #[serde(rename = "TM2")]
    TraditionalMedicine,
    /// Mortality and Morbidity Statistics linearization.
    #[serde(rename = "ICD-11 MMS")]
    Mms,
    /// Classification entry without a more specific branch.
    #[serde(rename = "ICD-11")]
    Icd11,
}

impl Registry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Registry::Foundation => "ICD-11 Foundation",
            Registry::TraditionalMedicine => "TM2",
            Registry::Mms => "ICD-11 MMS",
            Registry::Icd11 => "ICD-11",
        }
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One result returned by a classification search.
///
/// Remote registries return titles in several shapes; adapters flatten them
/// into this single form before the core sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationEntry {
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub definition: String,
    pub registry: Registry,
}

impl ClassificationEntry {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        definition: impl Into<String>,
        registry: Registry,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            definition: definition.into(),
            registry,
        }
    }
}

/// A candidate correspondence between a source record and a classification code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSuggestion {
    pub target_code: String,
    pub target_term: String,
    pub definition: String,
    pub source_registry: Registry,
    /// Integer confidence in `0..=100`.
    pub confidence: u8,
}

impl MappingSuggestion {
    pub fn from_entry(entry: &ClassificationEntry, confidence: u8) -> Self {
        Self {
            target_code: entry.code.clone(),
            target_term: entry.title.clone(),
            definition: entry.definition.clone(),
            source_registry: entry.registry,
            confidence,
        }
    }
}
