use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Heap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insertion => "insertion",
            Self::Merge => "merge",
            Self::Quick => "quick",
            Self::Heap => "heap",
        }
    }

    /// Human readable name, as shown in an algorithm picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Insertion => "Insertion Sort",
            Self::Merge => "Merge Sort",
            Self::Quick => "Quick Sort",
            Self::Heap => "Heap Sort",
        }
    }

    /// Accepts either the id (`"quick"`) or the label (`"Quick Sort"`),
    /// ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str().eq_ignore_ascii_case(s) || alg.label().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_parse() {
        assert_eq!(Algorithm::parse("quick"), Some(Algorithm::Quick));
        assert_eq!(Algorithm::parse("Heap Sort"), Some(Algorithm::Heap));
        assert_eq!(Algorithm::parse("MERGE"), Some(Algorithm::Merge));
        assert_eq!(Algorithm::parse("bogo"), None);
    }

    #[test]
    fn test_from_str_reports_unknown() {
        let err = "bogo".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownAlgorithm(ref name) if name == "bogo"));
        assert_eq!("insertion".parse::<Algorithm>().unwrap(), Algorithm::Insertion);
    }

    #[test]
    fn test_algorithm_default_is_insertion() {
        assert_eq!(Algorithm::default(), Algorithm::Insertion);
    }

    #[test]
    fn test_algorithm_serialization() {
        let json = serde_json::to_string(&Algorithm::Heap).unwrap();
        assert_eq!(json, "\"heap\"");

        let parsed: Algorithm = serde_json::from_str("\"merge\"").unwrap();
        assert_eq!(parsed, Algorithm::Merge);
    }

    #[test]
    fn test_as_str_round_trips_through_parse() {
        for alg in Algorithm::ALL {
            assert_eq!(Algorithm::parse(alg.as_str()), Some(alg));
        }
    }
}
