//! Error types for array dumps.

use std::fmt;
use std::io;

/// Errors that can occur while writing an array dump.
#[derive(Debug)]
pub enum DumpError {
    /// An I/O error occurred while creating or writing the file.
    Io(io::Error),
    /// The array is shorter than `rows * cols`.
    ShapeMismatch {
        /// Number of elements supplied.
        len: usize,
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ShapeMismatch { len, rows, cols } => {
                write!(f, "cannot dump {len} elements as {rows}x{cols}")
            }
        }
    }
}

impl std::error::Error for DumpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DumpError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
