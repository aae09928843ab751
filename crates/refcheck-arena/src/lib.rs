//! Aligned allocation for refcheck baselines and kernel inputs.
//!
//! Provides [`AlignedBuffer`], an owning buffer whose start address is a
//! multiple of a caller-chosen power-of-two alignment. This crate is the
//! only one in the workspace that may contain `unsafe` code, and all of it
//! lives in the private `raw` module.
//!
//! # Preconditions
//!
//! - Alignment is a power of two, at least the size of a pointer and at
//!   least the element size.
//! - A raw request covers at least one pointer's worth of bytes.
//!
//! The panicking constructors treat violations as programming errors; the
//! `try_*` forms report them as [`AllocError`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod error;
mod raw;

pub use buffer::{live_allocations, AlignedBuffer, POINTER_SIZE};
pub use error::AllocError;
