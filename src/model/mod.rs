pub mod counts;
pub mod metrics;
pub mod ranges;
pub mod result;

use std::fmt;

use serde::Serialize;

/// Which scoring method the batch simulates. The mode string feeds the
/// seed derivation, so the two modes produce disjoint number streams for
/// the same files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Proposed,
    Existing,
}

impl AnalysisMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisMode::Proposed => "proposed",
            AnalysisMode::Existing => "existing",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_strings_feed_seed_derivation() {
        assert_eq!(AnalysisMode::Proposed.as_str(), "proposed");
        assert_eq!(AnalysisMode::Existing.as_str(), "existing");
    }
}
