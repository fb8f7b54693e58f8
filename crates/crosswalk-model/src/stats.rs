//! Corpus statistics and per-vocabulary mapping reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::ConceptRecord;
use crate::source::SourceSystem;

/// Record counts across the whole corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_records: usize,
    pub by_system: BTreeMap<SourceSystem, usize>,
    pub by_category: BTreeMap<String, usize>,
}

impl CorpusStats {
    pub fn from_records(records: &[ConceptRecord]) -> Self {
        let mut stats = Self {
            total_records: records.len(),
            ..Self::default()
        };
        for system in SourceSystem::ALL {
            stats.by_system.insert(system, 0);
        }
        for record in records {
            *stats.by_system.entry(record.source_system).or_insert(0) += 1;
            *stats.by_category.entry(record.category.clone()).or_insert(0) += 1;
        }
        stats
    }
}

/// Mapping coverage for one vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingReport {
    pub source_system: SourceSystem,
    pub total_records: usize,
    pub mapped_records: usize,
    /// Mapped share in percent, rounded to two decimals.
    pub mapping_percentage: f64,
    pub categories: BTreeMap<String, usize>,
    /// RFC 3339 timestamp of report generation.
    pub generated_at: String,
}

impl MappingReport {
    pub fn from_records(
        source_system: SourceSystem,
        records: &[ConceptRecord],
        generated_at: impl Into<String>,
    ) -> Self {
        let mut categories = BTreeMap::new();
        let mut total = 0usize;
        let mut mapped = 0usize;
        for record in records.iter().filter(|r| r.source_system == source_system) {
            total += 1;
            if record.is_mapped() {
                mapped += 1;
            }
            *categories.entry(record.category.clone()).or_insert(0) += 1;
        }
        let mapping_percentage = if total == 0 {
            0.0
        } else {
            ((mapped as f64 / total as f64) * 10_000.0).round() / 100.0
        };
        Self {
            source_system,
            total_records: total,
            mapped_records: mapped,
            mapping_percentage,
            categories,
            generated_at: generated_at.into(),
        }
    }
}
