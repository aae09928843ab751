//! Tolerance-based equality for scalars and arrays.
//!
//! Floating-point values are compared in four steps:
//!
//! 1. Identical values (or identical bit patterns) are equal.
//! 2. If either value is exactly zero, `|a - b|` must be below
//!    [`Tolerance::absolute`].
//! 3. A difference below the type's smallest positive normal is equal.
//! 4. Otherwise `|a - b| / (|a| + |b|)` must be below
//!    [`Tolerance::relative`].
//!
//! NaN and infinite operands that are not identical never compare equal
//! and report an infinite error. Integers are compared exactly.

use smallvec::SmallVec;

use crate::error::CompareError;
use crate::kind::{Element, NumericKind};
use crate::tolerance::Tolerance;

/// Maximum number of individual mismatches kept in an [`ArrayComparison`].
///
/// Every mismatch still counts towards `mismatch_count` and `max_error`.
pub const RECORDED_MISMATCH_LIMIT: usize = 16;

/// Outcome of a scalar comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Verdict {
    /// Within tolerance.
    Equal,
    /// Outside tolerance, with the error magnitude that decided it.
    Differs(f64),
}

impl Verdict {
    /// Whether the values were judged equal.
    pub fn is_equal(self) -> bool {
        matches!(self, Self::Equal)
    }

    /// The error magnitude; `0.0` when equal.
    pub fn error(self) -> f64 {
        match self {
            Self::Equal => 0.0,
            Self::Differs(e) => e,
        }
    }
}

/// Compare two scalars of the same kind under `tolerance`.
pub fn equals<T: Element>(actual: T, reference: T, tolerance: &Tolerance) -> Verdict {
    actual.tolerant_eq(reference, tolerance)
}

macro_rules! impl_float_element {
    ($t:ty, $kind:expr) => {
        impl Element for $t {
            const KIND: NumericKind = $kind;

            fn tolerant_eq(self, reference: Self, tolerance: &Tolerance) -> Verdict {
                if self == reference || self.to_bits() == reference.to_bits() {
                    return Verdict::Equal;
                }
                if !self.is_finite() || !reference.is_finite() {
                    return Verdict::Differs(f64::INFINITY);
                }

                let e = (self - reference).abs();
                if self == 0.0 || reference == 0.0 {
                    return if e < <$t>::from(tolerance.absolute) {
                        Verdict::Equal
                    } else {
                        Verdict::Differs(f64::from(e))
                    };
                }
                if e < <$t>::MIN_POSITIVE {
                    return Verdict::Equal;
                }

                let denom = self.abs() + reference.abs();
                let normalized = if e.is_finite() && denom.is_finite() {
                    e / denom
                } else {
                    // Halve both sides so near-MAX operands do not overflow.
                    (self / 2.0 - reference / 2.0).abs() / (self.abs() / 2.0 + reference.abs() / 2.0)
                };
                if normalized < <$t>::from(tolerance.relative) {
                    Verdict::Equal
                } else {
                    Verdict::Differs(f64::from(normalized))
                }
            }

            fn to_f64(self) -> f64 {
                f64::from(self)
            }
        }
    };
}

impl_float_element!(f64, NumericKind::F64);
impl_float_element!(f32, NumericKind::F32);

impl Element for i32 {
    const KIND: NumericKind = NumericKind::I32;

    fn tolerant_eq(self, reference: Self, _tolerance: &Tolerance) -> Verdict {
        if self == reference {
            Verdict::Equal
        } else {
            Verdict::Differs((i64::from(self) - i64::from(reference)).abs() as f64)
        }
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

/// One element that fell outside tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mismatch {
    /// Flat (row-major) index of the element.
    pub index: usize,
    /// The checked value, widened to f64.
    pub actual: f64,
    /// The reference value, widened to f64.
    pub reference: f64,
    /// Error magnitude reported by the scalar comparison.
    pub error: f64,
}

/// Result of comparing two arrays element by element.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayComparison {
    /// Element kind of the compared arrays.
    pub kind: NumericKind,
    /// Number of elements compared.
    pub len: usize,
    /// Largest error over all mismatching elements; `0.0` if none.
    pub max_error: f64,
    /// Total number of mismatching elements.
    pub mismatch_count: usize,
    /// The first [`RECORDED_MISMATCH_LIMIT`] mismatches, in index order.
    pub mismatches: SmallVec<[Mismatch; 4]>,
}

impl ArrayComparison {
    /// Whether every element was within tolerance.
    pub fn is_equal(&self) -> bool {
        self.mismatch_count == 0
    }

    /// The mismatch with the largest error, if any were recorded.
    pub fn worst(&self) -> Option<&Mismatch> {
        self.mismatches
            .iter()
            .max_by(|a, b| a.error.total_cmp(&b.error))
    }
}

/// Compare `actual` against `reference` element by element.
///
/// Does not stop at the first mismatch: every element is visited so the
/// returned `max_error` covers the whole array. Each mismatch is logged
/// at `debug` level.
///
/// # Errors
///
/// Returns [`CompareError::LengthMismatch`] if the slices differ in length.
pub fn equals_slice<T: Element>(
    actual: &[T],
    reference: &[T],
    tolerance: &Tolerance,
) -> Result<ArrayComparison, CompareError> {
    if actual.len() != reference.len() {
        return Err(CompareError::LengthMismatch {
            actual: actual.len(),
            reference: reference.len(),
        });
    }

    let mut result = ArrayComparison {
        kind: T::KIND,
        len: actual.len(),
        max_error: 0.0,
        mismatch_count: 0,
        mismatches: SmallVec::new(),
    };

    for (index, (&a, &r)) in actual.iter().zip(reference).enumerate() {
        let Verdict::Differs(error) = a.tolerant_eq(r, tolerance) else {
            continue;
        };
        log::debug!("mismatch at [{index}]: error = {error}, actual = {a}, reference = {r}");
        result.mismatch_count += 1;
        if error > result.max_error {
            result.max_error = error;
        }
        if result.mismatches.len() < RECORDED_MISMATCH_LIMIT {
            result.mismatches.push(Mismatch {
                index,
                actual: a.to_f64(),
                reference: r.to_f64(),
                error,
            });
        }
    }

    Ok(result)
}
