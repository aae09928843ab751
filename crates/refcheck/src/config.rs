//! Checker configuration.

use std::path::PathBuf;

use refcheck_arena::POINTER_SIZE;
use refcheck_core::Tolerance;

use crate::error::ConfigError;
use crate::REFERENCE_NAME;

/// What happens when a check finds a mismatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckMode {
    /// Log the mismatch and return it as a successful outcome.
    #[default]
    Advisory,
    /// Return the mismatch as an error.
    Strict,
}

/// When checked outputs are dumped to text files.
///
/// Defaults to [`DumpPolicy::Never`] so that checks do not write into the
/// working directory unless asked to. Use [`DumpPolicy::OnMismatch`] to
/// get `out_<reference>` and `out_<name>` written for every failing check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DumpPolicy {
    /// Never write dump files.
    #[default]
    Never,
    /// Dump the baseline and the offending output when a check fails.
    OnMismatch,
    /// Dump every checked output before it is registered or compared.
    Always,
}

/// Configuration for an [`OutputChecker`](crate::OutputChecker).
///
/// Validated when the checker is constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckerConfig {
    /// Comparison thresholds.
    pub tolerance: Tolerance,
    /// Advisory or strict mismatch handling.
    pub mode: CheckMode,
    /// When to write dump files.
    pub dump: DumpPolicy,
    /// Directory dump files are written to.
    pub dump_dir: PathBuf,
    /// Alignment of stored baselines in bytes.
    ///
    /// Must be a power of two and at least the size of a pointer and of
    /// the widest element (`f64`).
    pub alignment: usize,
    /// Output name that always replaces the baseline.
    pub reference_name: String,
}

impl CheckerConfig {
    /// Default baseline alignment in bytes.
    pub const DEFAULT_ALIGNMENT: usize = 128;

    /// Default configuration in strict mode.
    pub fn strict() -> Self {
        Self {
            mode: CheckMode::Strict,
            ..Self::default()
        }
    }

    /// Check every field for consistency.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_valid() {
            return Err(ConfigError::InvalidTolerance {
                absolute: self.tolerance.absolute,
                relative: self.tolerance.relative,
            });
        }
        let minimum = POINTER_SIZE.max(std::mem::size_of::<f64>());
        if !self.alignment.is_power_of_two() || self.alignment < minimum {
            return Err(ConfigError::InvalidAlignment {
                alignment: self.alignment,
                minimum,
            });
        }
        if self.reference_name.is_empty() {
            return Err(ConfigError::EmptyReferenceName);
        }
        Ok(())
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            mode: CheckMode::default(),
            dump: DumpPolicy::default(),
            dump_dir: PathBuf::from("."),
            alignment: Self::DEFAULT_ALIGNMENT,
            reference_name: REFERENCE_NAME.to_string(),
        }
    }
}
