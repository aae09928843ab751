//! Allocation error types.

use std::error::Error;
use std::fmt;

/// Reasons an aligned allocation request can be refused.
///
/// The panicking constructors on [`AlignedBuffer`](crate::AlignedBuffer)
/// treat every variant except `OutOfMemory` as a programming error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// Alignment is not a power of two, or is smaller than a pointer or
    /// than one element.
    InvalidAlignment {
        /// The requested alignment in bytes.
        alignment: usize,
        /// The smallest alignment that would have been accepted.
        minimum: usize,
    },
    /// The request is smaller than one pointer.
    TooSmall {
        /// Requested size in bytes.
        bytes: usize,
        /// Minimum size in bytes.
        minimum: usize,
    },
    /// `count * size_of::<T>()`, rounded to the alignment, overflows `isize`.
    SizeOverflow {
        /// Requested element count.
        count: usize,
        /// Element size in bytes.
        element_size: usize,
    },
    /// The global allocator returned null.
    OutOfMemory {
        /// Requested size in bytes.
        bytes: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAlignment { alignment, minimum } => {
                write!(
                    f,
                    "invalid alignment {alignment}: must be a power of two and at least {minimum}"
                )
            }
            Self::TooSmall { bytes, minimum } => {
                write!(f, "allocation of {bytes} bytes is below the {minimum}-byte minimum")
            }
            Self::SizeOverflow {
                count,
                element_size,
            } => {
                write!(
                    f,
                    "allocation of {count} elements of {element_size} bytes overflows"
                )
            }
            Self::OutOfMemory { bytes } => write!(f, "out of memory allocating {bytes} bytes"),
        }
    }
}

impl Error for AllocError {}
