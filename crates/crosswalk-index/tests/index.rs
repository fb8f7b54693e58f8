//! Ranking behaviour of the lexical index.

use crosswalk_index::LexicalIndex;
use crosswalk_model::{ConceptRecord, IndexOptions, SourceSystem};
use proptest::prelude::*;

fn record(code: &str, term: &str, category: &str) -> ConceptRecord {
    ConceptRecord::new(SourceSystem::Ayurveda, code, term).with_category(category)
}

fn sample_corpus() -> Vec<ConceptRecord> {
    vec![
        record("AAA-1", "digestive fire imbalance", "Digestive"),
        record("AAB-2", "joint pain with swelling", "Musculoskeletal"),
        record("AAC-3", "chronic cough", "Respiratory"),
        record("AAD-4", "intermittent fever", "Fever"),
    ]
}

#[test]
fn single_record_scenario_ranks_first() {
    let corpus = vec![record("AAA-1", "digestive fire imbalance", "Digestive")];
    let index = LexicalIndex::build(&corpus, IndexOptions::default());
    let hits = index
        .rank("patient has digestive fire imbalance", 3)
        .expect("rank");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].position, 0);
    assert!((hits[0].similarity - 0.8944).abs() < 1e-3);
    assert!(hits[0].confidence >= 70);
}

#[test]
fn best_match_comes_first() {
    let index = LexicalIndex::build(&sample_corpus(), IndexOptions::default());
    let hits = index.rank("persistent cough at night", 3).expect("rank");
    assert_eq!(hits[0].position, 2);
    assert!(hits.iter().all(|hit| hit.similarity > 0.1));
}

#[test]
fn zero_k_and_unknown_terms_yield_nothing() {
    let index = LexicalIndex::build(&sample_corpus(), IndexOptions::default());
    assert!(index.rank("fever", 0).expect("rank").is_empty());
    assert!(index.rank("zzz qqq", 5).expect("rank").is_empty());
    assert!(index.rank("", 5).expect("rank").is_empty());
}

#[test]
fn empty_corpus_is_empty_result() {
    let index = LexicalIndex::build(&[], IndexOptions::default());
    assert!(index.is_built());
    assert!(index.rank("fever", 3).expect("rank").is_empty());
}

#[test]
fn equal_similarities_keep_corpus_order() {
    let corpus = vec![
        record("B1", "fever", ""),
        record("B2", "cough", ""),
        record("B3", "fever", ""),
    ];
    let index = LexicalIndex::build(&corpus, IndexOptions::default());
    let hits = index.rank("fever", 3).expect("rank");
    let positions: Vec<usize> = hits.iter().map(|hit| hit.position).collect();
    assert_eq!(positions, vec![0, 2]);
}

#[test]
fn target_fields_are_not_indexed() {
    let corpus = vec![
        ConceptRecord::new(SourceSystem::Unani, "U1", "waram")
            .with_target("MG40", "Fever of unknown origin"),
    ];
    let index = LexicalIndex::build(&corpus, IndexOptions::default());
    assert!(index.rank("fever unknown origin", 3).expect("rank").is_empty());
}

proptest! {
    #[test]
    fn rank_respects_k_and_threshold(
        query in "[a-z ]{0,40}",
        k in 0usize..6,
    ) {
        let index = LexicalIndex::build(&sample_corpus(), IndexOptions::default());
        let hits = index.rank(&query, k).unwrap();
        prop_assert!(hits.len() <= k);
        for hit in &hits {
            prop_assert!(hit.similarity > 0.1);
            prop_assert!((70..=95).contains(&hit.confidence));
        }
        for pair in hits.windows(2) {
            prop_assert!(pair[0].similarity >= pair[1].similarity);
        }
    }
}
