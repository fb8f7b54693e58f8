//! Column layouts of the source vocabularies.
//!
//! Each canonical field lists the headers it may be read from, in priority
//! order. The vocabulary's native header comes first, then the canonical
//! header written by [`crate::write_vocabulary_csv`], so written-back files
//! load through the same layout.

use crosswalk_model::SourceSystem;

use crate::csv_table::CsvTable;

/// Headers of the canonical layout, in write order.
pub const CANONICAL_HEADERS: [&str; 7] = [
    "code",
    "term_original",
    "term_english",
    "description",
    "category",
    "icd11_code",
    "icd11_term",
];

const DESCRIPTION: &[&str] = &["Short_definition", "Long_definition", "description"];
const TARGET_CODE: &[&str] = &["icd11_code", "target_code"];
const TARGET_TERM: &[&str] = &["icd11_term", "target_term"];

#[derive(Debug, Clone, Copy)]
pub struct VocabularyLayout {
    pub system: SourceSystem,
    pub code: &'static [&'static str],
    pub term_english: &'static [&'static str],
    pub term_original: &'static [&'static str],
    pub description: &'static [&'static str],
    pub category: &'static [&'static str],
    pub target_code: &'static [&'static str],
    pub target_term: &'static [&'static str],
    /// Category used when the table has no category value for a row.
    pub default_category: Option<&'static str>,
}

impl VocabularyLayout {
    pub fn for_system(system: SourceSystem) -> Self {
        match system {
            SourceSystem::Ayurveda => Self {
                system,
                code: &["NAMC_CODE", "code"],
                term_english: &["NAMC_term", "term_english"],
                term_original: &["NAMC_term_DEVANAGARI", "term_original"],
                description: DESCRIPTION,
                category: &["Ontology_branches", "category"],
                target_code: TARGET_CODE,
                target_term: TARGET_TERM,
                default_category: None,
            },
            SourceSystem::Siddha => Self {
                system,
                code: &["NAMC_CODE", "code"],
                term_english: &["NAMC_TERM", "term_english"],
                term_original: &["Tamil_term", "term_original"],
                description: DESCRIPTION,
                category: &["category"],
                target_code: TARGET_CODE,
                target_term: TARGET_TERM,
                default_category: Some("Siddha"),
            },
            SourceSystem::Unani => Self {
                system,
                code: &["NUMC_CODE", "code"],
                term_english: &["NUMC_TERM", "term_english"],
                term_original: &["Arabic_term", "term_original"],
                description: DESCRIPTION,
                category: &["category"],
                target_code: TARGET_CODE,
                target_term: TARGET_TERM,
                default_category: Some("Unani"),
            },
        }
    }

    /// Locate every canonical field in `table`. Absent fields resolve to `None`.
    pub fn resolve(&self, table: &CsvTable) -> ResolvedColumns {
        let find = |aliases: &[&str]| aliases.iter().find_map(|a| table.column_index(a));
        ResolvedColumns {
            code: find(self.code),
            term_english: find(self.term_english),
            term_original: find(self.term_original),
            description: find(self.description),
            category: find(self.category),
            target_code: find(self.target_code),
            target_term: find(self.target_term),
        }
    }
}

/// Column indexes of the canonical fields within one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub code: Option<usize>,
    pub term_english: Option<usize>,
    pub term_original: Option<usize>,
    pub description: Option<usize>,
    pub category: Option<usize>,
    pub target_code: Option<usize>,
    pub target_term: Option<usize>,
}

impl ResolvedColumns {
    /// Cell at `column` in `row`, or the empty string when absent.
    pub fn cell<'a>(row: &'a [String], column: Option<usize>) -> &'a str {
        column
            .and_then(|idx| row.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_header_wins_over_canonical() {
        let table = CsvTable::new(
            vec!["code".into(), "NAMC_CODE".into(), "NAMC_term".into()],
            vec![],
        );
        let columns = VocabularyLayout::for_system(SourceSystem::Ayurveda).resolve(&table);
        assert_eq!(columns.code, Some(1));
        assert_eq!(columns.term_english, Some(2));
        assert_eq!(columns.description, None);
    }

    #[test]
    fn canonical_headers_resolve_for_every_system() {
        let table = CsvTable::new(
            CANONICAL_HEADERS.iter().map(|h| h.to_string()).collect(),
            vec![],
        );
        for system in SourceSystem::ALL {
            let columns = VocabularyLayout::for_system(system).resolve(&table);
            assert_eq!(columns.code, Some(0));
            assert_eq!(columns.term_english, Some(2));
            assert_eq!(columns.category, Some(4));
            assert_eq!(columns.target_code, Some(5));
            assert_eq!(columns.target_term, Some(6));
        }
    }
}
