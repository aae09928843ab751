//! Core types for the refcheck verification workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! closed set of numeric kinds a kernel output may have, the tolerance
//! thresholds, and the scalar/array comparison rules every other crate
//! builds on.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod error;
pub mod kind;
pub mod tolerance;

pub use compare::{equals, equals_slice, ArrayComparison, Mismatch, Verdict};
pub use error::CompareError;
pub use kind::{Element, NumericKind};
pub use tolerance::Tolerance;
