use std::time::Duration;

/// One element returned by the output-candidate query.
///
/// `editable` is true when the element is itself an editable input (a
/// textarea or anything carrying an input role); such candidates must never
/// be read as output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    /// Raw text content of the element, untrimmed
    pub text: String,
    /// Whether the element is an editable input surface
    pub editable: bool,
}

impl Surface {
    /// Creates a new surface.
    #[must_use]
    pub fn new(text: impl Into<String>, editable: bool) -> Self {
        Self {
            text: text.into(),
            editable,
        }
    }

    /// Trimmed text content of the surface.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// Outcome of one appearance+finality detection pass.
///
/// Produced once per input mutation; not persisted beyond the single
/// verification it supports.
#[derive(Debug, Clone)]
pub struct StabilizationResult {
    /// Whether the appearance phase confirmed a candidate before the
    /// quiescence window; false when the empty-output fast path skipped
    /// the poll entirely
    pub settled: bool,
    /// The finally-read, trimmed output text
    pub text: String,
    /// Wall-clock time from mutation to the final read
    pub elapsed: Duration,
}
