//! Suite partitioning of the fixture dataset.

use crate::case::VerificationCase;
use serde::{Deserialize, Serialize};

/// Intent of a suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteKind {
    /// Regular, correct-usage inputs
    Positive,
    /// Adversarial or malformed inputs
    Negative,
    /// Boundary and degenerate inputs
    Edge,
    /// Keystroke-level interactive input
    Interactive,
}

impl SuiteKind {
    /// Stable lowercase label used in reports and CLI selection.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Edge => "edge",
            Self::Interactive => "interactive",
        }
    }
}

/// A named, ordered group of verification cases sharing intent.
///
/// Order within a suite is significant only for reporting; each case is
/// independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suite {
    /// Suite name used in reports
    pub name: String,
    /// Intent tag
    pub kind: SuiteKind,
    /// Ordered cases
    pub cases: Vec<VerificationCase>,
}

impl Suite {
    /// Creates a suite from already-parsed cases.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SuiteKind, cases: Vec<VerificationCase>) -> Self {
        Self {
            name: name.into(),
            kind,
            cases,
        }
    }

    /// Number of cases in the suite.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the suite holds no cases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_kind_labels() {
        assert_eq!(SuiteKind::Positive.label(), "positive");
        assert_eq!(SuiteKind::Negative.label(), "negative");
        assert_eq!(SuiteKind::Edge.label(), "edge");
        assert_eq!(SuiteKind::Interactive.label(), "interactive");
    }

    #[test]
    fn test_empty_suite() {
        let suite = Suite::new("empty", SuiteKind::Positive, Vec::new());
        assert!(suite.is_empty());
        assert_eq!(suite.len(), 0);
    }
}
