//! TF-IDF weighting over a fitted vocabulary.

use std::collections::{BTreeMap, HashSet};

use crate::tokenize::analyze;

/// L2-normalized sparse vector, entries sorted by feature index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_counts(counts: BTreeMap<usize, f64>) -> Self {
        let norm = counts.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Self::default();
        }
        Self {
            entries: counts.into_iter().map(|(idx, w)| (idx, w / norm)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cosine similarity; both vectors are unit length or empty.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Fitted term vocabulary with smoothed inverse document frequencies.
#[derive(Debug, Clone, Default)]
pub struct TfidfModel {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfModel {
    /// Fit on `documents`, keeping the `max_features` most frequent terms.
    ///
    /// Frequency is the total count across the corpus; ties go to the
    /// lexically smaller term. A `max_features` of zero keeps every term.
    pub fn fit(documents: &[String], max_features: usize) -> Self {
        let mut total: BTreeMap<String, usize> = BTreeMap::new();
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for document in documents {
            let terms = analyze(document);
            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            for term in terms {
                *total.entry(term).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = total.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if max_features > 0 {
            ranked.truncate(max_features);
        }
        let mut selected: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        selected.sort();

        let n = documents.len() as f64;
        let idf = selected
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        let vocabulary = selected
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();
        Self { vocabulary, idf }
    }

    pub fn feature_count(&self) -> usize {
        self.idf.len()
    }

    /// Vectorize `text`; terms outside the fitted vocabulary are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in analyze(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        for (idx, weight) in counts.iter_mut() {
            *weight *= self.idf[*idx];
        }
        SparseVector::from_counts(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_features_keeps_most_frequent_terms() {
        let docs = vec![
            "fever fever cough".to_string(),
            "fever headache".to_string(),
        ];
        let model = TfidfModel::fit(&docs, 2);
        assert_eq!(model.feature_count(), 2);
        assert!(model.transform("headache").is_empty());
        assert!(!model.transform("fever").is_empty());
    }

    #[test]
    fn identical_text_has_unit_cosine() {
        let docs = vec!["joint pain swelling".to_string()];
        let model = TfidfModel::fit(&docs, 0);
        let a = model.transform("joint pain swelling");
        assert!((a.cosine(&a) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_vocabulary_query_is_empty() {
        let docs = vec!["joint pain".to_string()];
        let model = TfidfModel::fit(&docs, 0);
        let v = model.transform("headache");
        assert!(v.is_empty());
        assert_eq!(v.cosine(&model.transform("joint")), 0.0);
    }
}
