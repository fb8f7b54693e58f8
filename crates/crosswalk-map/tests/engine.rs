//! Suggestion and auto-mapping behaviour.

use std::sync::Arc;
use std::time::Duration;

use crosswalk_map::{
    AutoMapper, ClassificationSearch, SearchError, StaticCatalog, SuggestionEngine,
    SuggestionOrigin, UnconfiguredSearch,
};
use crosswalk_model::{
    ClassificationEntry, ConceptRecord, CrosswalkError, Registry, SourceSystem, SuggestionOptions,
};
use proptest::prelude::*;

struct FixedSearch(Vec<ClassificationEntry>);

impl ClassificationSearch for FixedSearch {
    fn search(&self, _term: &str) -> Result<Vec<ClassificationEntry>, SearchError> {
        Ok(self.0.clone())
    }
}

/// Returns one exact-title entry for terms starting with `match`.
struct ExactSearch;

impl ClassificationSearch for ExactSearch {
    fn search(&self, term: &str) -> Result<Vec<ClassificationEntry>, SearchError> {
        if term.starts_with("match") {
            Ok(vec![ClassificationEntry::new(
                "TM01",
                term,
                "",
                Registry::TraditionalMedicine,
            )])
        } else {
            Ok(Vec::new())
        }
    }
}

struct SlowSearch;

impl ClassificationSearch for SlowSearch {
    fn search(&self, term: &str) -> Result<Vec<ClassificationEntry>, SearchError> {
        std::thread::sleep(Duration::from_millis(500));
        Ok(vec![ClassificationEntry::new("LATE", term, "", Registry::Mms)])
    }
}

fn engine(search: impl ClassificationSearch + 'static) -> SuggestionEngine {
    SuggestionEngine::new(Arc::new(search), SuggestionOptions::default())
}

fn entry(code: &str, title: &str) -> ClassificationEntry {
    ClassificationEntry::new(code, title, "", Registry::Icd11)
}

#[test]
fn fever_with_empty_search_uses_keyword_fallback() {
    let engine = engine(FixedSearch(Vec::new()));
    let set = engine.suggest_for_term("fever", "X1").expect("suggest");
    assert_eq!(set.origin, SuggestionOrigin::KeywordFallback);
    assert_eq!(set.suggestions.len(), 1);
    assert_eq!(set.suggestions[0].target_code, "MG40");
    assert_eq!(set.suggestions[0].target_term, "Fever of unknown origin");
    assert_eq!(set.suggestions[0].confidence, 90);
}

#[test]
fn unconfigured_search_without_keyword_returns_generic_entries() {
    let engine = engine(UnconfiguredSearch);
    let set = engine.suggest_for_term("headache", "X2").expect("suggest");
    assert_eq!(set.origin, SuggestionOrigin::GenericFallback);
    let codes: Vec<&str> = set
        .suggestions
        .iter()
        .map(|s| s.target_code.as_str())
        .collect();
    assert_eq!(codes, vec!["XX00", "BA00", "DD90"]);
}

#[test]
fn registry_candidates_are_scored_and_capped() {
    let engine = engine(FixedSearch(vec![
        entry("A", "vata disorders chronic"),
        entry("B", "vata disorders"),
        entry("C", "unrelated title"),
        entry("D", "vata disorders"),
        entry("E", "vata disorders of joints"),
    ]));
    let set = engine.suggest_for_term("Vata disorders", "X3").expect("suggest");
    assert_eq!(set.origin, SuggestionOrigin::Registry);
    let codes: Vec<&str> = set
        .suggestions
        .iter()
        .map(|s| s.target_code.as_str())
        .collect();
    // B and D tie at 95 and keep input order.
    assert_eq!(codes, vec!["B", "D", "A"]);
    assert_eq!(set.suggestions[2].confidence, 67);
}

#[test]
fn oversized_suggestion_limit_is_capped() {
    let options = SuggestionOptions {
        max_suggestions: 10,
        ..SuggestionOptions::default()
    };
    let engine = SuggestionEngine::new(
        Arc::new(FixedSearch(vec![
            entry("A", "vata disorders"),
            entry("B", "vata disorders"),
            entry("C", "vata disorders"),
            entry("D", "vata disorders"),
            entry("E", "vata disorders"),
        ])),
        options,
    );
    assert_eq!(engine.options().max_suggestions, 3);
    let set = engine.suggest_for_term("Vata disorders", "X4").expect("suggest");
    assert_eq!(set.suggestions.len(), 3);

    let generic = SuggestionEngine::new(Arc::new(UnconfiguredSearch), options)
        .suggest_for_term("unmatched condition", "X5")
        .expect("suggest");
    assert!(generic.suggestions.len() <= 3);
}

#[test]
fn builtin_catalog_maps_tm2_entry() {
    let engine = engine(StaticCatalog::builtin());
    let set = engine.suggest_for_term("Vata disorders", "AYU-1").expect("suggest");
    assert_eq!(set.suggestions[0].target_code, "BA4Z");
    assert_eq!(set.suggestions[0].source_registry, Registry::TraditionalMedicine);
    assert_eq!(set.suggestions[0].confidence, 95);
}

#[test]
fn empty_term_is_validation_error() {
    let engine = engine(UnconfiguredSearch);
    let err = engine.suggest_for_term("   ", "X4").expect_err("empty term");
    assert!(matches!(err, CrosswalkError::Validation { .. }));
}

#[test]
fn timed_out_search_falls_back() {
    let engine = engine(SlowSearch).with_timeout(Some(Duration::from_millis(20)));
    let set = engine.suggest_for_term("fever", "X5").expect("suggest");
    assert_eq!(set.origin, SuggestionOrigin::KeywordFallback);
    assert_eq!(set.suggestions[0].target_code, "MG40");
}

fn ten_records() -> Vec<ConceptRecord> {
    (0..10)
        .map(|i| {
            let term = if i % 3 == 0 {
                format!("match term {i}")
            } else {
                format!("other term {i}")
            };
            ConceptRecord::new(SourceSystem::Ayurveda, format!("A{i}"), term)
        })
        .collect()
}

#[test]
fn auto_map_applies_only_confident_suggestions() {
    let engine = engine(ExactSearch);
    let mapper = AutoMapper::new(&engine, 80);
    let outcome = mapper.run(ten_records());
    assert_eq!(outcome.mapped_count, 4);
    assert_eq!(outcome.evaluated, 10);
    assert_eq!(outcome.failed, 0);
    let mapped: Vec<&str> = outcome
        .records
        .iter()
        .filter(|r| r.is_mapped())
        .map(|r| r.code.as_str())
        .collect();
    assert_eq!(mapped, vec!["A0", "A3", "A6", "A9"]);
    assert!(outcome.records.iter().filter(|r| r.is_mapped()).all(|r| r.target_code == "TM01"));
}

#[test]
fn auto_map_is_idempotent() {
    let engine = engine(ExactSearch);
    let mapper = AutoMapper::new(&engine, 80);
    let first = mapper.run(ten_records());
    let second = mapper.run(first.records.clone());
    assert_eq!(second.mapped_count, 0);
    assert_eq!(second.evaluated, 6);
    assert_eq!(second.records, first.records);
}

#[test]
fn floor_is_strict() {
    // Keyword fallback for "kapha" carries exactly 80.
    let engine = engine(UnconfiguredSearch);
    let records = vec![ConceptRecord::new(SourceSystem::Siddha, "S1", "kapha excess")];
    let outcome = AutoMapper::new(&engine, 80).run(records);
    assert_eq!(outcome.mapped_count, 0);
    assert!(!outcome.records[0].is_mapped());
}

#[test]
fn invalid_record_counts_as_failed() {
    let engine = engine(UnconfiguredSearch);
    let records = vec![
        ConceptRecord::new(SourceSystem::Unani, "U1", ""),
        ConceptRecord::new(SourceSystem::Unani, "U2", "fever"),
    ];
    let outcome = AutoMapper::new(&engine, 80).run(records);
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.mapped_count, 1);
    assert_eq!(outcome.records[1].target_code, "MG40");
}

proptest! {
    #[test]
    fn suggestions_are_capped_and_sorted(
        term in "[a-z]{1,6}( [a-z]{1,6}){0,3}",
        titles in proptest::collection::vec("[a-z]{1,6}( [a-z]{1,6}){0,3}", 0..8),
    ) {
        let entries = titles
            .iter()
            .enumerate()
            .map(|(i, title)| entry(&format!("C{i}"), title))
            .collect();
        let engine = engine(FixedSearch(entries));
        let set = engine.suggest_for_term(&term, "P1").unwrap();
        prop_assert!(set.suggestions.len() <= 3);
        prop_assert!(!set.suggestions.is_empty());
        for pair in set.suggestions.windows(2) {
            prop_assert!(pair[0].confidence >= pair[1].confidence);
        }
        for suggestion in &set.suggestions {
            prop_assert!(suggestion.confidence <= 95);
        }
    }
}
