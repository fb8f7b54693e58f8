//! Table of keyword and generic fallback suggestions.

use crosswalk_model::{MappingSuggestion, Registry};

/// Keyword-triggered suggestion used when the registry offers nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub keyword: String,
    pub suggestion: MappingSuggestion,
}

/// Suggestions used when classification search yields no usable candidate.
///
/// Keyword rules are tried in table order against the lower-cased term; the
/// first rule whose keyword is a substring wins. Without a keyword match the
/// generic entries apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackTable {
    rules: Vec<KeywordRule>,
    generic: Vec<MappingSuggestion>,
}

fn suggestion(code: &str, term: &str, definition: &str, confidence: u8) -> MappingSuggestion {
    MappingSuggestion {
        target_code: code.to_string(),
        target_term: term.to_string(),
        definition: definition.to_string(),
        source_registry: Registry::Icd11,
        confidence,
    }
}

impl FallbackTable {
    pub fn new(rules: Vec<KeywordRule>, generic: Vec<MappingSuggestion>) -> Self {
        Self { rules, generic }
    }

    pub fn builtin() -> Self {
        let rule = |keyword: &str, code: &str, term: &str, confidence: u8| KeywordRule {
            keyword: keyword.to_string(),
            suggestion: suggestion(code, term, "", confidence),
        };
        Self::new(
            vec![
                rule("vata", "BA00", "Disorders of the nervous system", 85),
                rule("pitta", "DA00", "Disorders of the digestive system", 82),
                rule("kapha", "CA00", "Disorders of the circulatory system", 80),
                rule("fever", "MG40", "Fever of unknown origin", 90),
                rule("cough", "CA42", "Cough", 88),
                rule("pain", "MG30", "Pain", 85),
            ],
            vec![
                suggestion("XX00", "General medical condition", "", 75),
                suggestion(
                    "BA00",
                    "Disorders of the nervous system",
                    "Diseases affecting the central and peripheral nervous systems",
                    70,
                ),
                suggestion(
                    "DD90",
                    "Digestive system disorders",
                    "Diseases affecting the digestive tract and related organs",
                    65,
                ),
            ],
        )
    }

    pub fn keyword_match(&self, term: &str) -> Option<&MappingSuggestion> {
        let term = term.to_lowercase();
        self.rules
            .iter()
            .find(|rule| term.contains(rule.keyword.as_str()))
            .map(|rule| &rule.suggestion)
    }

    pub fn generic(&self) -> &[MappingSuggestion] {
        &self.generic
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_keyword_wins() {
        let table = FallbackTable::builtin();
        let hit = table.keyword_match("Vata fever").unwrap();
        assert_eq!(hit.target_code, "BA00");
        assert_eq!(table.keyword_match("FEVER").unwrap().confidence, 90);
        assert!(table.keyword_match("headache").is_none());
    }

    #[test]
    fn generic_entries_stay_below_auto_map_floor() {
        let table = FallbackTable::builtin();
        assert_eq!(table.generic().len(), 3);
        assert!(table.generic().iter().all(|s| s.confidence <= 80));
    }
}
