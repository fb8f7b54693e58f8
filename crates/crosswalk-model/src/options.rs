//! Configuration options for the crosswalk engine.
//!
//! Options are plain serde structs so they can be read from a TOML file.
//! Every field has a default; a config file only needs the keys it changes.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CrosswalkError, Result};

/// Environment variable overriding the vocabulary resources directory.
pub const RESOURCES_ENV_VAR: &str = "CROSSWALK_RESOURCES_DIR";

/// Upper bound on suggestions returned for one term.
pub const MAX_SUGGESTIONS: usize = 3;

/// Options for the TF-IDF lexical index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexOptions {
    /// Maximum number of unigram/bigram features kept in the vocabulary.
    pub max_features: usize,
    /// Results with cosine similarity at or below this value are dropped.
    pub min_similarity: f64,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            max_features: 1000,
            min_similarity: 0.1,
        }
    }
}

/// Options for the mapping suggestion engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionOptions {
    /// Candidates need a token-overlap similarity strictly above this value.
    pub min_similarity: f64,
    /// Maximum number of suggestions returned per record, at most
    /// [`MAX_SUGGESTIONS`].
    pub max_suggestions: usize,
}

impl Default for SuggestionOptions {
    fn default() -> Self {
        Self {
            min_similarity: 0.3,
            max_suggestions: 3,
        }
    }
}

/// Top-level engine options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Directory holding one CSV file per source vocabulary.
    pub resources_dir: PathBuf,
    /// Upper bound for one classification search call, in milliseconds.
    /// `None` runs the search inline without a bound.
    pub search_timeout_ms: Option<u64>,
    /// Auto-mapping accepts a top suggestion only when its confidence is
    /// strictly greater than this floor.
    pub auto_map_floor: u8,
    pub index: IndexOptions,
    pub suggestion: SuggestionOptions,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            resources_dir: PathBuf::from("resources"),
            search_timeout_ms: Some(5000),
            auto_map_floor: 80,
            index: IndexOptions::default(),
            suggestion: SuggestionOptions::default(),
        }
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from TOML text.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read options from a TOML file and check their bounds.
    pub fn from_toml_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let options = Self::from_toml_str(&content).map_err(|e| CrosswalkError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        options.validate().map_err(|message| CrosswalkError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(options)
    }

    /// Check values serde cannot bound on its own.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.suggestion.max_suggestions > MAX_SUGGESTIONS {
            return Err(format!(
                "suggestion.max_suggestions must be at most {MAX_SUGGESTIONS}, got {}",
                self.suggestion.max_suggestions
            ));
        }
        Ok(())
    }

    /// Apply `CROSSWALK_RESOURCES_DIR` when it is set and non-empty.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var(RESOURCES_ENV_VAR)
            && !dir.trim().is_empty()
        {
            self.resources_dir = PathBuf::from(dir);
        }
        self
    }

    #[must_use]
    pub fn with_resources_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resources_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_search_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.search_timeout_ms = timeout.map(|t| t.as_millis() as u64);
        self
    }

    pub fn search_timeout(&self) -> Option<Duration> {
        self.search_timeout_ms.map(Duration::from_millis)
    }
}
