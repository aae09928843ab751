//! Comparison error types.

use std::error::Error;
use std::fmt;

/// Errors from the array form of the comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompareError {
    /// The two arrays do not have the same number of elements.
    LengthMismatch {
        /// Length of the checked array.
        actual: usize,
        /// Length of the reference array.
        reference: usize,
    },
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { actual, reference } => {
                write!(
                    f,
                    "length mismatch: checked array has {actual} elements, reference has {reference}"
                )
            }
        }
    }
}

impl Error for CompareError {}
