//! Benchmark inputs for refcheck.
//!
//! Provides deterministic reference/candidate pairs sized like typical
//! kernel outputs:
//!
//! - [`matching_pair`]: candidate equal to the reference within tolerance
//! - [`drifted_pair`]: candidate with every `stride`-th element perturbed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use refcheck_arena::AlignedBuffer;
use refcheck_io::{create_input, Generate, InputPattern};

/// Side length of the square benchmark matrix (256x256 = 64K elements).
pub const SIDE: usize = 256;

/// Seed shared by every benchmark input.
pub const SEED: u64 = 42;

/// A reference output and a candidate that reproduces it exactly.
pub fn matching_pair<T: Generate>(rows: usize, cols: usize) -> (AlignedBuffer<T>, Vec<T>) {
    let reference = create_input::<T>(rows, cols, InputPattern::Random, SEED);
    let candidate = reference.to_vec();
    (reference, candidate)
}

/// A reference output and an f32 candidate with every `stride`-th element
/// shifted by one.
///
/// A `stride` of zero perturbs nothing.
pub fn drifted_pair(rows: usize, cols: usize, stride: usize) -> (AlignedBuffer<f32>, Vec<f32>) {
    let (reference, mut candidate) = matching_pair::<f32>(rows, cols);
    if stride > 0 {
        for v in candidate.iter_mut().step_by(stride) {
            *v += 1.0;
        }
    }
    (reference, candidate)
}
