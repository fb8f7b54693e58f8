//! Classification search capability and its local implementations.

use std::path::Path;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crosswalk_model::{ClassificationEntry, CrosswalkError, Registry};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("classification search is not configured")]
    Unconfigured,
    #[error("classification search unavailable: {0}")]
    Unavailable(String),
    #[error("classification search timed out after {0:?}")]
    TimedOut(Duration),
}

impl From<SearchError> for CrosswalkError {
    fn from(error: SearchError) -> Self {
        CrosswalkError::UpstreamUnavailable(error.to_string())
    }
}

/// Search over a target classification.
///
/// Results may be empty and carry no ordering guarantee.
pub trait ClassificationSearch: Send + Sync {
    fn search(&self, term: &str) -> Result<Vec<ClassificationEntry>, SearchError>;
}

impl<T: ClassificationSearch + ?Sized> ClassificationSearch for Arc<T> {
    fn search(&self, term: &str) -> Result<Vec<ClassificationEntry>, SearchError> {
        (**self).search(term)
    }
}

/// Stand-in used when no registry is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredSearch;

impl ClassificationSearch for UnconfiguredSearch {
    fn search(&self, _term: &str) -> Result<Vec<ClassificationEntry>, SearchError> {
        Err(SearchError::Unconfigured)
    }
}

/// In-memory catalog of classification entries.
///
/// An entry matches when the lower-cased query is a substring of its title,
/// definition, or code.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<ClassificationEntry>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<ClassificationEntry>) -> Self {
        Self { entries }
    }

    /// Offline demonstration catalog.
    pub fn builtin() -> Self {
        let icd = |code: &str, title: &str, definition: &str| {
            ClassificationEntry::new(code, title, definition, Registry::Icd11)
        };
        let tm2 = |code: &str, title: &str, definition: &str| {
            ClassificationEntry::new(code, title, definition, Registry::TraditionalMedicine)
        };
        Self::new(vec![
            icd(
                "BA00",
                "Disorders of the nervous system",
                "Diseases affecting the central and peripheral nervous systems",
            ),
            icd(
                "DD90",
                "Digestive system disorders",
                "Diseases affecting the digestive tract and related organs",
            ),
            icd(
                "CA40",
                "Respiratory system disorders",
                "Diseases affecting the respiratory tract and lungs",
            ),
            icd(
                "FB00",
                "Skin and subcutaneous tissue disorders",
                "Diseases affecting the skin and underlying tissues",
            ),
            icd(
                "FA00",
                "Musculoskeletal system disorders",
                "Diseases affecting bones, joints, and muscles",
            ),
            tm2(
                "BA4Z",
                "Vata disorders",
                "Traditional medicine disorders related to Vata dosha",
            ),
            tm2(
                "BA5Z",
                "Pitta disorders",
                "Traditional medicine disorders related to Pitta dosha",
            ),
            tm2(
                "BA6Z",
                "Kapha disorders",
                "Traditional medicine disorders related to Kapha dosha",
            ),
        ])
    }

    /// Load a JSON array of classification entries.
    pub fn from_json_path(path: &Path) -> crosswalk_model::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<ClassificationEntry> =
            serde_json::from_str(&content).map_err(|e| CrosswalkError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[ClassificationEntry] {
        &self.entries
    }
}

impl ClassificationSearch for StaticCatalog {
    fn search(&self, term: &str) -> Result<Vec<ClassificationEntry>, SearchError> {
        let query = term.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .entries
            .iter()
            .filter(|entry| {
                entry.title.to_lowercase().contains(&query)
                    || entry.definition.to_lowercase().contains(&query)
                    || entry.code.to_lowercase().contains(&query)
            })
            .cloned()
            .collect())
    }
}

/// Runs an inner search on a worker thread and gives up after `timeout`.
pub struct TimeoutSearch {
    inner: Arc<dyn ClassificationSearch>,
    timeout: Duration,
}

impl TimeoutSearch {
    pub fn new(inner: Arc<dyn ClassificationSearch>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

impl ClassificationSearch for TimeoutSearch {
    fn search(&self, term: &str) -> Result<Vec<ClassificationEntry>, SearchError> {
        let (sender, receiver) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let term = term.to_string();
        std::thread::spawn(move || {
            // The receiver is gone once the caller timed out.
            let _ = sender.send(inner.search(&term));
        });
        match receiver.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(SearchError::TimedOut(self.timeout)),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(SearchError::Unavailable(
                "search worker stopped without a result".to_string(),
            )),
        }
    }
}
