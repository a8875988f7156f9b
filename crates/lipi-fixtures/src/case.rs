//! Schema for individual verification cases.

use serde::{Deserialize, Serialize};

/// Ordinal size bucket of a case's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthClass {
    /// Empty input
    #[serde(rename = "Empty")]
    Empty,
    /// Short input (a sentence or less)
    #[serde(rename = "S")]
    Short,
    /// Medium input (a few sentences)
    #[serde(rename = "M")]
    Medium,
    /// Long input (paragraph scale)
    #[serde(rename = "L")]
    Long,
}

/// One oracle (input, expected-output) pair plus classification metadata.
///
/// `input` and `expected` are immutable once defined and may both be empty
/// strings. `id` is unique across the whole dataset, not just its suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerificationCase {
    /// Opaque identifier, unique across all suites
    pub id: String,
    /// Human label
    pub name: String,
    /// Romanized input to write into the input surface
    pub input: String,
    /// Exact oracle output, compared without normalization
    pub expected: String,
    /// Classification tag
    pub category: String,
    /// Grammar classification tag
    pub grammar: String,
    /// Size bucket
    pub length: LengthClass,
}

impl VerificationCase {
    /// Whether this case legitimately expects an empty output.
    ///
    /// Such cases must skip the appearance poll entirely: polling for
    /// non-empty text can never succeed for an intentionally empty result.
    #[must_use]
    pub fn expects_empty(&self) -> bool {
        self.expected.is_empty()
    }
}

/// A case driven one keystroke at a time rather than as one bulk write.
///
/// The mid-stream invariant concerns the output after `partial_input` has
/// been typed: the service must have reacted with *some* non-empty text,
/// but the exact intermediate content is unconstrained. Only the final
/// output is compared, against `expected_final`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InteractiveCase {
    /// Opaque identifier, unique across all suites
    pub id: String,
    /// Human label
    pub name: String,
    /// Full romanized input
    pub input: String,
    /// Prefix typed before the mid-stream assertion; must be a proper
    /// prefix of `input`
    pub partial_input: String,
    /// Exact oracle for the output once the full input has settled
    pub expected_final: String,
    /// Classification tag
    pub category: String,
    /// Grammar classification tag
    pub grammar: String,
    /// Size bucket
    pub length: LengthClass,
}

impl InteractiveCase {
    /// The characters still to be typed after the partial prefix.
    ///
    /// Empty when `partial_input` is not actually a prefix of `input`;
    /// dataset validation rejects that before any runner sees the case.
    #[must_use]
    pub fn remainder(&self) -> &str {
        self.input
            .strip_prefix(self.partial_input.as_str())
            .unwrap_or_default()
    }
}
