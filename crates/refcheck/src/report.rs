//! Structured results of output checks.

use std::fmt;

use refcheck_core::{ArrayComparison, Mismatch, NumericKind};

/// Details of an output that differed from its baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct MismatchReport {
    /// Name of the checked output.
    pub name: String,
    /// Rows of the checked output.
    pub rows: usize,
    /// Columns of the checked output.
    pub cols: usize,
    /// Element-wise comparison against the baseline.
    pub comparison: ArrayComparison,
}

impl MismatchReport {
    /// Element kind of the output.
    pub fn kind(&self) -> NumericKind {
        self.comparison.kind
    }

    /// Largest error over all mismatching elements.
    pub fn max_error(&self) -> f64 {
        self.comparison.max_error
    }

    /// Number of mismatching elements.
    pub fn mismatch_count(&self) -> usize {
        self.comparison.mismatch_count
    }

    /// Recorded individual mismatches.
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.comparison.mismatches
    }
}

impl fmt::Display for MismatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} has an error of {}", self.name, self.max_error())
    }
}

/// Result of one [`OutputChecker::check`](crate::OutputChecker::check) call.
#[derive(Clone, Debug, PartialEq)]
pub enum CheckOutcome {
    /// The output became the baseline for its kind.
    Registered {
        /// Kind of the new baseline.
        kind: NumericKind,
        /// Whether an earlier baseline was replaced.
        replaced: bool,
    },
    /// The output matched the baseline within tolerance.
    Matched,
    /// The output differed from the baseline.
    Mismatched(MismatchReport),
}

impl CheckOutcome {
    /// Whether this outcome is a mismatch.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatched(_))
    }

    /// The mismatch report, if any.
    pub fn report(&self) -> Option<&MismatchReport> {
        match self {
            Self::Mismatched(r) => Some(r),
            _ => None,
        }
    }
}

/// Tally of the latest outcome per output name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckSummary {
    /// Outputs that were registered as baselines.
    pub registered: usize,
    /// Outputs that matched their baseline.
    pub matched: usize,
    /// Outputs that differed from their baseline.
    pub mismatched: usize,
    /// Name and error of the worst mismatch.
    pub worst: Option<(String, f64)>,
}

impl CheckSummary {
    /// Whether no output mismatched.
    pub fn all_passed(&self) -> bool {
        self.mismatched == 0
    }
}

impl<'a> FromIterator<(&'a str, &'a CheckOutcome)> for CheckSummary {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a CheckOutcome)>>(iter: I) -> Self {
        let mut summary = Self::default();
        for (name, outcome) in iter {
            match outcome {
                CheckOutcome::Registered { .. } => summary.registered += 1,
                CheckOutcome::Matched => summary.matched += 1,
                CheckOutcome::Mismatched(report) => {
                    summary.mismatched += 1;
                    let error = report.max_error();
                    if summary.worst.as_ref().is_none_or(|(_, e)| error > *e) {
                        summary.worst = Some((name.to_string(), error));
                    }
                }
            }
        }
        summary
    }
}

impl fmt::Display for CheckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} registered, {} matched, {} mismatched",
            self.registered, self.matched, self.mismatched
        )?;
        if let Some((name, error)) = &self.worst {
            write!(f, " (worst: {name}, error {error})")?;
        }
        Ok(())
    }
}
