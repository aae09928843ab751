//! Tolerance thresholds shared by every floating-point comparison.

/// Absolute and relative thresholds for floating-point equality.
///
/// `absolute` applies when either compared value is exactly zero;
/// `relative` applies to `|a - b| / (|a| + |b|)` otherwise. Integer
/// comparisons ignore both.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    /// Threshold on `|a - b|` when either value is zero.
    pub absolute: f32,
    /// Threshold on the normalized difference for nonzero values.
    pub relative: f32,
}

impl Tolerance {
    /// Default absolute threshold.
    pub const DEFAULT_ABSOLUTE: f32 = 1e-4;

    /// Default relative threshold.
    pub const DEFAULT_RELATIVE: f32 = 1e-4;

    /// Create a tolerance with explicit thresholds.
    pub const fn new(absolute: f32, relative: f32) -> Self {
        Self { absolute, relative }
    }

    /// Replace the absolute threshold.
    pub fn with_absolute(mut self, absolute: f32) -> Self {
        self.absolute = absolute;
        self
    }

    /// Replace the relative threshold.
    pub fn with_relative(mut self, relative: f32) -> Self {
        self.relative = relative;
        self
    }

    /// Whether both thresholds are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.absolute.is_finite()
            && self.absolute >= 0.0
            && self.relative.is_finite()
            && self.relative >= 0.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ABSOLUTE, Self::DEFAULT_RELATIVE)
    }
}
