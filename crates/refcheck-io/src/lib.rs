//! Array dumps and input generation for refcheck.
//!
//! Neither module touches checker state: [`dump`] writes arrays to text
//! files for inspection, [`fill`] produces kernel inputs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dump;
pub mod error;
pub mod fill;

pub use dump::{dump_array, dump_path, write_array, DUMP_PREFIX, DUMP_PRECISION};
pub use error::DumpError;
pub use fill::{clean, create_input, fill, fill_random, fill_regular, Generate, InputPattern};
