//! Functional impact classification of a genetic variant

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of variant impact categories
///
/// Shared by DTO validation, persisted models, storage (as the
/// SCREAMING_SNAKE_CASE text) and list filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactType {
    Missense,
    Frameshift,
    Nonsense,
    Silent,
    SpliceSite,
}

impl ImpactType {
    /// All categories, in display order
    pub const ALL: [ImpactType; 5] = [
        ImpactType::Missense,
        ImpactType::Frameshift,
        ImpactType::Nonsense,
        ImpactType::Silent,
        ImpactType::SpliceSite,
    ];

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactType::Missense => "MISSENSE",
            ImpactType::Frameshift => "FRAMESHIFT",
            ImpactType::Nonsense => "NONSENSE",
            ImpactType::Silent => "SILENT",
            ImpactType::SpliceSite => "SPLICE_SITE",
        }
    }

    /// Comma-separated list of accepted values, for error messages
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|i| i.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ImpactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImpactType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|impact| impact.as_str() == s.trim())
            .ok_or_else(|| {
                format!(
                    "impact '{}' is not valid. Must be one of: {}",
                    s,
                    Self::allowed_values()
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("MISSENSE", ImpactType::Missense)]
    #[test_case("FRAMESHIFT", ImpactType::Frameshift)]
    #[test_case("NONSENSE", ImpactType::Nonsense)]
    #[test_case("SILENT", ImpactType::Silent)]
    #[test_case("SPLICE_SITE", ImpactType::SpliceSite)]
    fn test_parse_known_values(raw: &str, expected: ImpactType) {
        assert_eq!(raw.parse::<ImpactType>().unwrap(), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[test_case("missense"; "lowercase")]
    #[test_case("INTRONIC"; "unknown category")]
    #[test_case(""; "empty")]
    fn test_parse_rejects(raw: &str) {
        let err = raw.parse::<ImpactType>().unwrap_err();
        assert!(err.contains("SPLICE_SITE"));
    }

    #[test]
    fn test_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&ImpactType::SpliceSite).unwrap();
        assert_eq!(json, "\"SPLICE_SITE\"");
    }
}
