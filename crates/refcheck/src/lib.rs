//! refcheck: reference-output verification for numerical kernels.
//!
//! Run a reference implementation of a kernel, hand its output to an
//! [`OutputChecker`] under the reference name, then hand it the outputs of
//! every other implementation. Each is compared element-wise against the
//! stored baseline within an absolute/relative tolerance.
//!
//! # Quick start
//!
//! ```rust
//! use refcheck::prelude::*;
//!
//! let input = create_input::<f32>(4, 4, InputPattern::Random, 1);
//! let reference: Vec<f32> = input.iter().map(|x| x * 2.0).collect();
//! let candidate: Vec<f32> = input.iter().map(|x| x + x).collect();
//!
//! let mut checker = OutputChecker::new(CheckerConfig::strict()).unwrap();
//! checker.check(&reference, REFERENCE_NAME, 4, 4).unwrap();
//! checker.check(&candidate, "doubled", 4, 4).unwrap();
//! assert!(checker.summary().all_passed());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `refcheck-core` | Numeric kinds, tolerance, scalar/array comparison |
//! | [`arena`] | `refcheck-arena` | Owning aligned buffers |
//! | [`io`] | `refcheck-io` | Array dumps and input generation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod checker;
pub mod config;
pub mod error;
pub mod registry;
pub mod report;

pub use checker::OutputChecker;
pub use config::{CheckMode, CheckerConfig, DumpPolicy};
pub use error::{CheckError, ConfigError};
pub use registry::{Baseline, BaselineElement, BaselineRegistry};
pub use report::{CheckOutcome, CheckSummary, MismatchReport};

/// Output name that marks the reference implementation.
pub const REFERENCE_NAME: &str = "cpu";

/// Numeric kinds, tolerance and comparison (`refcheck-core`).
pub use refcheck_core as types;

/// Owning aligned buffers (`refcheck-arena`).
pub use refcheck_arena as arena;

/// Array dumps and kernel input generation (`refcheck-io`).
pub use refcheck_io as io;

/// Common imports for typical usage.
///
/// ```rust
/// use refcheck::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CheckError, CheckMode, CheckOutcome, CheckSummary, CheckerConfig, DumpPolicy,
        MismatchReport, OutputChecker, REFERENCE_NAME,
    };

    pub use refcheck_arena::AlignedBuffer;
    pub use refcheck_core::{equals, equals_slice, Element, NumericKind, Tolerance, Verdict};
    pub use refcheck_io::{create_input, InputPattern};
}
