//! The closed set of numeric kinds a checked output may have.
//!
//! [`Element`] is sealed: it is implemented for `f64`, `f32` and `i32`
//! only, so any other element type is rejected at compile time.

use std::fmt;

use crate::compare::Verdict;
use crate::tolerance::Tolerance;

/// Element kind of a checked array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericKind {
    /// IEEE 754 double precision.
    F64,
    /// IEEE 754 single precision.
    F32,
    /// 32-bit signed integer.
    I32,
}

impl NumericKind {
    /// All supported kinds, in declaration order.
    pub const ALL: [NumericKind; 3] = [Self::F64, Self::F32, Self::I32];

    /// Size of one element in bytes.
    pub const fn size_of(self) -> usize {
        match self {
            Self::F64 => std::mem::size_of::<f64>(),
            Self::F32 => std::mem::size_of::<f32>(),
            Self::I32 => std::mem::size_of::<i32>(),
        }
    }

    /// Whether comparisons of this kind apply a tolerance.
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F64 | Self::F32)
    }

    /// Short lowercase name (`"f64"`, `"f32"`, `"i32"`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::I32 => "i32",
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for f64 {}
    impl Sealed for f32 {}
    impl Sealed for i32 {}
}

/// A scalar type that can appear in a checked output.
///
/// Implemented for exactly `f64`, `f32` and `i32`. The comparison rules
/// for each kind live in [`crate::compare`].
pub trait Element:
    sealed::Sealed + Copy + PartialEq + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// The runtime tag for this element type.
    const KIND: NumericKind;

    /// Compare `self` against `reference` under `tolerance`.
    fn tolerant_eq(self, reference: Self, tolerance: &Tolerance) -> Verdict;

    /// Lossless-enough widening used for diagnostics.
    fn to_f64(self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_each_kind_once() {
        assert_eq!(NumericKind::ALL.len(), 3);
        let floats = NumericKind::ALL.iter().filter(|k| k.is_float()).count();
        assert_eq!(floats, 2);
        let names: Vec<_> = NumericKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names, ["f64", "f32", "i32"]);
    }

    #[test]
    fn sizes_match_primitive_types() {
        assert_eq!(NumericKind::F64.size_of(), 8);
        assert_eq!(NumericKind::F32.size_of(), 4);
        assert_eq!(NumericKind::I32.size_of(), 4);
    }

    #[test]
    fn kind_constants_follow_type() {
        assert_eq!(<f64 as Element>::KIND, NumericKind::F64);
        assert_eq!(<f32 as Element>::KIND, NumericKind::F32);
        assert_eq!(<i32 as Element>::KIND, NumericKind::I32);
    }

    #[test]
    fn only_float_kinds_have_tolerance() {
        assert!(NumericKind::F64.is_float());
        assert!(NumericKind::F32.is_float());
        assert!(!NumericKind::I32.is_float());
    }

    #[test]
    fn display_uses_short_name() {
        assert_eq!(NumericKind::F32.to_string(), "f32");
        assert_eq!(format!("{}", NumericKind::I32), "i32");
    }
}
