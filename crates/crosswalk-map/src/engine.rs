//! Mapping suggestion engine.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crosswalk_model::{
    ConceptRecord, CrosswalkError, MAX_SUGGESTIONS, MappingSuggestion, Result, SuggestionOptions,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::fallback::FallbackTable;
use crate::score::{jaccard, mapping_confidence};
use crate::search::{ClassificationSearch, TimeoutSearch};

/// Where a set of suggestions came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionOrigin {
    Registry,
    KeywordFallback,
    GenericFallback,
}

impl SuggestionOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionOrigin::Registry => "registry",
            SuggestionOrigin::KeywordFallback => "keyword fallback",
            SuggestionOrigin::GenericFallback => "generic fallback",
        }
    }
}

impl fmt::Display for SuggestionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionSet {
    pub origin: SuggestionOrigin,
    /// Sorted by descending confidence.
    pub suggestions: Vec<MappingSuggestion>,
}

impl SuggestionSet {
    pub fn top(&self) -> Option<&MappingSuggestion> {
        self.suggestions.first()
    }
}

/// Scores classification search results against source terms.
#[derive(Clone)]
pub struct SuggestionEngine {
    search: Arc<dyn ClassificationSearch>,
    fallback: FallbackTable,
    options: SuggestionOptions,
}

impl SuggestionEngine {
    /// `options.max_suggestions` is capped at [`MAX_SUGGESTIONS`].
    pub fn new(search: Arc<dyn ClassificationSearch>, mut options: SuggestionOptions) -> Self {
        options.max_suggestions = options.max_suggestions.min(MAX_SUGGESTIONS);
        Self {
            search,
            fallback: FallbackTable::builtin(),
            options,
        }
    }

    /// Bound every search call by `timeout`. `None` leaves calls unbounded.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        if let Some(timeout) = timeout {
            self.search = Arc::new(TimeoutSearch::new(self.search, timeout));
        }
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackTable) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn options(&self) -> &SuggestionOptions {
        &self.options
    }

    pub fn suggest(&self, record: &ConceptRecord) -> Result<SuggestionSet> {
        self.suggest_for_term(&record.term_english, &record.code)
    }

    /// Suggest targets for a bare term. `code` is only used for logging.
    pub fn suggest_for_term(&self, term: &str, code: &str) -> Result<SuggestionSet> {
        let term = term.trim();
        if term.is_empty() {
            return Err(CrosswalkError::validation(
                "term_english",
                "term must not be empty",
            ));
        }

        let candidates = match self.search.search(term) {
            Ok(candidates) => candidates,
            Err(error) => {
                warn!(code, %error, "classification search failed, using fallback");
                Vec::new()
            }
        };

        let mut suggestions: Vec<MappingSuggestion> = candidates
            .iter()
            .filter_map(|entry| {
                let similarity = jaccard(term, &entry.title);
                (similarity > self.options.min_similarity)
                    .then(|| MappingSuggestion::from_entry(entry, mapping_confidence(similarity)))
            })
            .collect();
        suggestions.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        suggestions.truncate(self.options.max_suggestions);

        let set = if !suggestions.is_empty() {
            SuggestionSet {
                origin: SuggestionOrigin::Registry,
                suggestions,
            }
        } else if let Some(hit) = self.fallback.keyword_match(term) {
            SuggestionSet {
                origin: SuggestionOrigin::KeywordFallback,
                suggestions: vec![hit.clone()],
            }
        } else {
            let mut generic = self.fallback.generic().to_vec();
            generic.sort_by(|a, b| b.confidence.cmp(&a.confidence));
            generic.truncate(self.options.max_suggestions);
            SuggestionSet {
                origin: SuggestionOrigin::GenericFallback,
                suggestions: generic,
            }
        };
        debug!(
            code,
            origin = %set.origin,
            candidates = candidates.len(),
            suggestions = set.suggestions.len(),
            "suggested mappings"
        );
        Ok(set)
    }
}
