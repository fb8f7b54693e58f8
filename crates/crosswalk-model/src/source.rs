//! Source vocabulary tags.
//!
//! Each traditional-medicine coding system is loaded from its own table and
//! every canonical record remembers which one it came from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A traditional-medicine vocabulary.
///
/// The declaration order is the corpus order: records are merged Ayurveda
/// first, then Siddha, then Unani.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceSystem {
    Ayurveda,
    Siddha,
    Unani,
}

impl SourceSystem {
    /// All vocabularies in corpus order.
    pub const ALL: [SourceSystem; 3] = [
        SourceSystem::Ayurveda,
        SourceSystem::Siddha,
        SourceSystem::Unani,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSystem::Ayurveda => "Ayurveda",
            SourceSystem::Siddha => "Siddha",
            SourceSystem::Unani => "Unani",
        }
    }

    /// File name of the vocabulary inside the resources directory.
    pub fn resource_file_name(&self) -> String {
        format!("namaste_{}.csv", self.as_str().to_lowercase())
    }
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AYURVEDA" => Ok(SourceSystem::Ayurveda),
            "SIDDHA" => Ok(SourceSystem::Siddha),
            "UNANI" => Ok(SourceSystem::Unani),
            _ => Err(format!("Unknown source vocabulary: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("ayurveda".parse::<SourceSystem>(), Ok(SourceSystem::Ayurveda));
        assert_eq!(" SIDDHA ".parse::<SourceSystem>(), Ok(SourceSystem::Siddha));
        assert_eq!("Unani".parse::<SourceSystem>(), Ok(SourceSystem::Unani));
        assert!("homeopathy".parse::<SourceSystem>().is_err());
    }

    #[test]
    fn resource_file_names() {
        assert_eq!(
            SourceSystem::Ayurveda.resource_file_name(),
            "namaste_ayurveda.csv"
        );
        assert_eq!(SourceSystem::Unani.resource_file_name(), "namaste_unani.csv");
    }
}
