//! Dataset assembly, embedded oracle data, and load-time validation.

use crate::case::{InteractiveCase, VerificationCase};
use crate::suite::{Suite, SuiteKind};
use lipi_core::{Error, Result};
use std::collections::HashSet;

/// Embedded oracle suite: correct-usage inputs.
const POSITIVE_JSON: &str = include_str!("../fixtures/positive.json");
/// Embedded oracle suite: adversarial and malformed inputs.
const NEGATIVE_JSON: &str = include_str!("../fixtures/negative.json");
/// Embedded oracle suite: boundary and degenerate inputs.
const EDGE_JSON: &str = include_str!("../fixtures/edge.json");
/// Embedded oracle case for the keystroke-level path.
const INTERACTIVE_JSON: &str = include_str!("../fixtures/interactive.json");

/// The complete, validated fixture dataset.
///
/// Defined once at harness start and read-only for the run.
#[derive(Debug, Clone)]
pub struct FixtureDataset {
    /// Bulk-write suites in execution order
    suites: Vec<Suite>,
    /// The designated keystroke-level case
    interactive: InteractiveCase,
}

impl FixtureDataset {
    /// Assembles a dataset from parsed parts, enforcing the load-time
    /// invariants: every case id is unique across all suites (the
    /// interactive case included), and the interactive partial input is a
    /// proper prefix of its full input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fixture`] if any invariant is violated.
    pub fn from_parts(suites: Vec<Suite>, interactive: InteractiveCase) -> Result<Self> {
        let dataset = Self {
            suites,
            interactive,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Loads the built-in oracle dataset embedded in this crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded JSON fails to parse or validate;
    /// both indicate a defect in the shipped data.
    pub fn builtin() -> Result<Self> {
        let positive: Vec<VerificationCase> = serde_json::from_str(POSITIVE_JSON)?;
        let negative: Vec<VerificationCase> = serde_json::from_str(NEGATIVE_JSON)?;
        let edge: Vec<VerificationCase> = serde_json::from_str(EDGE_JSON)?;
        let interactive: InteractiveCase = serde_json::from_str(INTERACTIVE_JSON)?;

        Self::from_parts(
            vec![
                Suite::new("positive", SuiteKind::Positive, positive),
                Suite::new("negative", SuiteKind::Negative, negative),
                Suite::new("edge", SuiteKind::Edge, edge),
            ],
            interactive,
        )
    }

    /// All bulk-write suites in execution order.
    #[must_use]
    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    /// The suite with the given intent, if present.
    #[must_use]
    pub fn suite(&self, kind: SuiteKind) -> Option<&Suite> {
        self.suites.iter().find(|suite| suite.kind == kind)
    }

    /// The designated keystroke-level case.
    #[must_use]
    pub fn interactive(&self) -> &InteractiveCase {
        &self.interactive
    }

    /// Total number of cases, the interactive case included.
    #[must_use]
    pub fn total_cases(&self) -> usize {
        self.suites.iter().map(Suite::len).sum::<usize>() + 1
    }

    /// Checks the dataset invariants.
    fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();

        for suite in &self.suites {
            for case in &suite.cases {
                if !seen.insert(case.id.as_str()) {
                    return Err(Error::Fixture(format!(
                        "duplicate case id {:?} in suite {:?}",
                        case.id, suite.name
                    )));
                }
            }
        }

        if !seen.insert(self.interactive.id.as_str()) {
            return Err(Error::Fixture(format!(
                "interactive case id {:?} collides with a suite case",
                self.interactive.id
            )));
        }

        if self.interactive.input == self.interactive.partial_input
            || !self
                .interactive
                .input
                .starts_with(self.interactive.partial_input.as_str())
        {
            return Err(Error::Fixture(format!(
                "interactive case {:?}: partial_input must be a proper prefix of input",
                self.interactive.id
            )));
        }

        Ok(())
    }
}
