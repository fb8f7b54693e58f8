//! Lexical index over the corpus and its ranking.

use crosswalk_model::{ConceptRecord, CrosswalkError, IndexOptions, Result};
use tracing::{debug, info};

use crate::tfidf::{SparseVector, TfidfModel};

/// Lowest and highest confidence a prediction reports.
pub const PREDICTION_CONFIDENCE_RANGE: (u8, u8) = (70, 95);

/// One ranked corpus document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedHit {
    /// Position of the record in the corpus the index was built from.
    pub position: usize,
    pub similarity: f64,
    pub confidence: u8,
}

#[derive(Debug, Clone)]
struct Trained {
    model: TfidfModel,
    documents: Vec<SparseVector>,
}

/// TF-IDF index over a corpus snapshot.
///
/// A default index is unbuilt and answers every ranking with
/// [`CrosswalkError::NotReady`].
#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    options: IndexOptions,
    trained: Option<Trained>,
}

impl LexicalIndex {
    pub fn build(records: &[ConceptRecord], options: IndexOptions) -> Self {
        let texts: Vec<String> = records
            .iter()
            .map(|record| record.indexed_text().to_lowercase())
            .collect();
        let model = TfidfModel::fit(&texts, options.max_features);
        let documents: Vec<SparseVector> = texts.iter().map(|t| model.transform(t)).collect();
        info!(
            documents = documents.len(),
            features = model.feature_count(),
            "trained lexical index"
        );
        Self {
            options,
            trained: Some(Trained { model, documents }),
        }
    }

    pub fn is_built(&self) -> bool {
        self.trained.is_some()
    }

    pub fn len(&self) -> usize {
        self.trained.as_ref().map_or(0, |t| t.documents.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rank corpus documents against `text`.
    ///
    /// Hits at or below the similarity threshold are dropped. Equal
    /// similarities keep corpus order.
    pub fn rank(&self, text: &str, k: usize) -> Result<Vec<RankedHit>> {
        let trained = self.trained.as_ref().ok_or(CrosswalkError::NotReady)?;
        if k == 0 || trained.documents.is_empty() {
            return Ok(Vec::new());
        }
        let query = trained.model.transform(&text.to_lowercase());
        if query.is_empty() {
            debug!("query has no indexed terms");
            return Ok(Vec::new());
        }
        let mut hits: Vec<RankedHit> = trained
            .documents
            .iter()
            .enumerate()
            .map(|(position, doc)| (position, query.cosine(doc)))
            .filter(|(_, similarity)| *similarity > self.options.min_similarity)
            .map(|(position, similarity)| RankedHit {
                position,
                similarity,
                confidence: prediction_confidence(similarity),
            })
            .collect();
        hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        hits.truncate(k);
        Ok(hits)
    }
}

/// `round(similarity * 100)` clamped to the prediction range.
pub fn prediction_confidence(similarity: f64) -> u8 {
    let (low, high) = PREDICTION_CONFIDENCE_RANGE;
    let scaled = (similarity * 100.0).round();
    if scaled.is_nan() {
        return low;
    }
    scaled.clamp(f64::from(low), f64::from(high)) as u8
}
