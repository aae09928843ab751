//! Error types for the output checker.

use std::error::Error;
use std::fmt;

use crate::report::MismatchReport;

/// Invalid [`CheckerConfig`](crate::CheckerConfig) values.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A threshold is negative, NaN or infinite.
    InvalidTolerance {
        /// Configured absolute threshold.
        absolute: f32,
        /// Configured relative threshold.
        relative: f32,
    },
    /// Baseline alignment is not a power of two or is too small.
    InvalidAlignment {
        /// Configured alignment in bytes.
        alignment: usize,
        /// Smallest accepted alignment in bytes.
        minimum: usize,
    },
    /// The reference output name is empty.
    EmptyReferenceName,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTolerance { absolute, relative } => {
                write!(
                    f,
                    "invalid tolerance: absolute={absolute}, relative={relative} \
                     (must be finite and >= 0)"
                )
            }
            Self::InvalidAlignment { alignment, minimum } => {
                write!(
                    f,
                    "invalid alignment {alignment}: must be a power of two >= {minimum}"
                )
            }
            Self::EmptyReferenceName => write!(f, "reference output name is empty"),
        }
    }
}

impl Error for ConfigError {}

/// Errors returned by [`OutputChecker::check`](crate::OutputChecker::check).
#[derive(Clone, Debug, PartialEq)]
pub enum CheckError {
    /// The output length does not match its declared shape or the stored
    /// baseline.
    ShapeMismatch {
        /// Name of the checked output.
        name: String,
        /// Expected number of elements.
        expected: usize,
        /// Actual number of elements.
        actual: usize,
    },
    /// The output differs from the baseline (strict mode only).
    Mismatch(Box<MismatchReport>),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "output '{name}': expected {expected} elements, got {actual}"
                )
            }
            Self::Mismatch(report) => write!(f, "{report}"),
        }
    }
}

impl Error for CheckError {}
