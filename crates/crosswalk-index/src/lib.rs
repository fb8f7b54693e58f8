//! Lexical similarity index for clinician-facing prediction.
//!
//! Each corpus record is indexed as `term_english description category`,
//! weighted with TF-IDF over unigrams and bigrams, and ranked by cosine
//! similarity against free text.

pub mod index;
pub mod tfidf;
pub mod tokenize;

pub use index::{LexicalIndex, PREDICTION_CONFIDENCE_RANGE, RankedHit, prediction_confidence};
pub use tfidf::{SparseVector, TfidfModel};
pub use tokenize::{analyze, is_stop_word, tokenize};
