//! Kernel input generation.
//!
//! Inputs are either uniformly random (deterministic for a given seed) or
//! regular (every element one). Random floats are drawn from `[0, 10)`,
//! random integers from `[0, 256)`.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use refcheck_arena::AlignedBuffer;
use refcheck_core::Element;

/// Alignment of buffers returned by [`create_input`], in bytes.
pub const INPUT_ALIGNMENT: usize = 128;

/// How [`fill`] populates an array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputPattern {
    /// Uniform random values.
    #[default]
    Random,
    /// Every element set to one.
    Regular,
}

/// Element types that can be generated as kernel inputs.
pub trait Generate: Element {
    /// The value used by [`InputPattern::Regular`].
    const ONE: Self;

    /// Draw one uniform random value.
    fn sample(rng: &mut ChaCha8Rng) -> Self;
}

impl Generate for f64 {
    const ONE: Self = 1.0;

    fn sample(rng: &mut ChaCha8Rng) -> Self {
        10.0 * rng.random::<f64>()
    }
}

impl Generate for f32 {
    const ONE: Self = 1.0;

    fn sample(rng: &mut ChaCha8Rng) -> Self {
        10.0 * rng.random::<f32>()
    }
}

impl Generate for i32 {
    const ONE: Self = 1;

    fn sample(rng: &mut ChaCha8Rng) -> Self {
        rng.random_range(0..256)
    }
}

/// Fill `data` with uniform random values.
pub fn fill_random<T: Generate>(data: &mut [T], rng: &mut ChaCha8Rng) {
    for v in data {
        *v = T::sample(rng);
    }
}

/// Fill `data` with ones.
pub fn fill_regular<T: Generate>(data: &mut [T]) {
    data.fill(T::ONE);
}

/// Reset `data` to zero.
pub fn clean<T: Element>(data: &mut [T]) {
    data.fill(T::default());
}

/// Fill `data` according to `pattern`.
pub fn fill<T: Generate>(data: &mut [T], pattern: InputPattern, rng: &mut ChaCha8Rng) {
    match pattern {
        InputPattern::Random => fill_random(data, rng),
        InputPattern::Regular => fill_regular(data),
    }
}

/// Allocate an aligned `rows x cols` input and fill it.
///
/// The same `seed` always produces the same random input.
pub fn create_input<T: Generate>(
    rows: usize,
    cols: usize,
    pattern: InputPattern,
    seed: u64,
) -> AlignedBuffer<T> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = vec![T::default(); rows * cols];
    fill(&mut data, pattern, &mut rng);
    AlignedBuffer::from_slice(&data, INPUT_ALIGNMENT)
}
