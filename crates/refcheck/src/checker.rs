//! The capture-or-compare protocol for named kernel outputs.
//!
//! Each call to [`OutputChecker::check`] either registers the output as
//! the baseline for its element kind or compares it against the existing
//! baseline:
//!
//! - The reference output (named [`REFERENCE_NAME`](crate::REFERENCE_NAME)
//!   by default) always replaces the baseline.
//! - The first output of a kind becomes the baseline if none is set.
//! - Every other output is compared element-wise within tolerance.
//!
//! Mismatches are logged at `warn` level. In [`CheckMode::Advisory`] they
//! are returned as [`CheckOutcome::Mismatched`]; in [`CheckMode::Strict`]
//! as [`CheckError::Mismatch`].

use indexmap::IndexMap;
use refcheck_arena::AlignedBuffer;
use refcheck_core::equals_slice;
use refcheck_io::dump_array;

use crate::config::{CheckMode, CheckerConfig, DumpPolicy};
use crate::error::{CheckError, ConfigError};
use crate::registry::{BaselineElement, BaselineRegistry};
use crate::report::{CheckOutcome, CheckSummary, MismatchReport};

/// Captures reference outputs and checks later outputs against them.
///
/// # Examples
///
/// ```
/// use refcheck::prelude::*;
///
/// let mut checker = OutputChecker::new(CheckerConfig::default()).unwrap();
/// checker.check(&[1.0f32, 2.0, 3.0, 4.0], "cpu", 1, 4).unwrap();
///
/// let outcome = checker.check(&[1.0f32, 2.0, 3.0, 4.001], "gpu", 1, 4).unwrap();
/// assert!(outcome.is_mismatch());
///
/// let outcome = checker.check(&[1.0f32, 2.0, 3.0, 4.0], "simd", 1, 4).unwrap();
/// assert_eq!(outcome, CheckOutcome::Matched);
/// ```
#[derive(Debug)]
pub struct OutputChecker {
    config: CheckerConfig,
    registry: BaselineRegistry,
    history: IndexMap<String, CheckOutcome>,
}

impl OutputChecker {
    /// Create a checker with an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(config: CheckerConfig) -> Result<Self, ConfigError> {
        Self::with_registry(config, BaselineRegistry::new())
    }

    /// Create a checker around an existing registry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn with_registry(
        config: CheckerConfig,
        registry: BaselineRegistry,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            registry,
            history: IndexMap::new(),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// The baseline registry.
    pub fn registry(&self) -> &BaselineRegistry {
        &self.registry
    }

    /// Mutable access to the baseline registry.
    pub fn registry_mut(&mut self) -> &mut BaselineRegistry {
        &mut self.registry
    }

    /// Consume the checker, returning its registry.
    pub fn into_registry(self) -> BaselineRegistry {
        self.registry
    }

    /// Set the threshold used when either value is zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTolerance`] for negative or
    /// non-finite values; the previous threshold is kept.
    pub fn set_absolute_threshold(&mut self, absolute: f32) -> Result<(), ConfigError> {
        self.set_tolerance(self.config.tolerance.with_absolute(absolute))
    }

    /// Set the threshold on the normalized difference.
    ///
    /// # Errors
    ///
    /// As for [`OutputChecker::set_absolute_threshold`].
    pub fn set_relative_threshold(&mut self, relative: f32) -> Result<(), ConfigError> {
        self.set_tolerance(self.config.tolerance.with_relative(relative))
    }

    fn set_tolerance(&mut self, tolerance: refcheck_core::Tolerance) -> Result<(), ConfigError> {
        if !tolerance.is_valid() {
            return Err(ConfigError::InvalidTolerance {
                absolute: tolerance.absolute,
                relative: tolerance.relative,
            });
        }
        self.config.tolerance = tolerance;
        Ok(())
    }

    /// Dump every subsequently checked output.
    pub fn enable_printing(&mut self) {
        self.config.dump = DumpPolicy::Always;
    }

    /// Switch between advisory and strict mismatch handling.
    pub fn set_mode(&mut self, mode: CheckMode) {
        self.config.mode = mode;
    }

    /// Register or check a `rows x cols` output named `name`.
    ///
    /// # Errors
    ///
    /// - [`CheckError::ShapeMismatch`] if `output.len() != rows * cols`, or
    ///   if it differs in length from the stored baseline.
    /// - [`CheckError::Mismatch`] in strict mode when the output differs.
    ///
    /// A dump that cannot be written is logged at `warn` level and does not
    /// change the outcome.
    pub fn check<T: BaselineElement>(
        &mut self,
        output: &[T],
        name: &str,
        rows: usize,
        cols: usize,
    ) -> Result<CheckOutcome, CheckError> {
        let expected = rows.checked_mul(cols);
        if expected != Some(output.len()) {
            return Err(CheckError::ShapeMismatch {
                name: name.to_string(),
                expected: expected.unwrap_or(usize::MAX),
                actual: output.len(),
            });
        }

        if self.config.dump == DumpPolicy::Always {
            self.dump(name, output, rows, cols);
        }

        let is_reference = name == self.config.reference_name;
        let Some(baseline) = self.registry.get::<T>().filter(|_| !is_reference) else {
            let buffer = AlignedBuffer::from_slice(output, self.config.alignment);
            let replaced = self.registry.set(buffer);
            log::debug!(
                "{name}: registered {rows}x{cols} {} baseline (replaced: {replaced})",
                T::KIND
            );
            return Ok(self.record(
                name,
                CheckOutcome::Registered {
                    kind: T::KIND,
                    replaced,
                },
            ));
        };

        let comparison = equals_slice(output, baseline, &self.config.tolerance).map_err(|_| {
            CheckError::ShapeMismatch {
                name: name.to_string(),
                expected: baseline.len(),
                actual: output.len(),
            }
        })?;
        if comparison.is_equal() {
            return Ok(self.record(name, CheckOutcome::Matched));
        }

        let report = MismatchReport {
            name: name.to_string(),
            rows,
            cols,
            comparison,
        };
        log::warn!("{report}");
        if self.config.dump == DumpPolicy::OnMismatch {
            self.dump(&self.config.reference_name, baseline, rows, cols);
            self.dump(name, output, rows, cols);
        }

        let outcome = self.record(name, CheckOutcome::Mismatched(report));
        match (self.config.mode, outcome) {
            (CheckMode::Strict, CheckOutcome::Mismatched(report)) => {
                Err(CheckError::Mismatch(Box::new(report)))
            }
            (_, outcome) => Ok(outcome),
        }
    }

    /// Register or check a single value.
    ///
    /// # Errors
    ///
    /// As for [`OutputChecker::check`].
    pub fn check_scalar<T: BaselineElement>(
        &mut self,
        value: T,
        name: &str,
    ) -> Result<CheckOutcome, CheckError> {
        self.check(&[value], name, 1, 1)
    }

    /// Register or check a row vector.
    ///
    /// # Errors
    ///
    /// As for [`OutputChecker::check`].
    pub fn check_row<T: BaselineElement>(
        &mut self,
        output: &[T],
        name: &str,
    ) -> Result<CheckOutcome, CheckError> {
        self.check(output, name, 1, output.len())
    }

    /// Latest outcome per output name, in first-checked order.
    pub fn history(&self) -> &IndexMap<String, CheckOutcome> {
        &self.history
    }

    /// Tally of [`OutputChecker::history`].
    pub fn summary(&self) -> CheckSummary {
        self.history
            .iter()
            .map(|(name, outcome)| (name.as_str(), outcome))
            .collect()
    }

    /// Forget recorded outcomes. Baselines are kept.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn dump<T: BaselineElement>(&self, name: &str, data: &[T], rows: usize, cols: usize) {
        if let Err(e) = dump_array(&self.config.dump_dir, name, data, rows, cols) {
            log::warn!(
                "{name}: dump to {} failed: {e}",
                self.config.dump_dir.display()
            );
        }
    }

    fn record(&mut self, name: &str, outcome: CheckOutcome) -> CheckOutcome {
        self.history.insert(name.to_string(), outcome.clone());
        outcome
    }
}
