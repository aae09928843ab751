//! Plain-text array dumps for inspecting kernel outputs.
//!
//! A dump of output `name` is written to `<dir>/out_<name>`:
//!
//! ```text
//! 1.00000 2.00000 3.00000
//! 4.00000 5.00000 6.00000
//!
//! ```
//!
//! One row per line, every value followed by a single space, a blank line
//! at the end. Floats use [`DUMP_PRECISION`] decimals; integers are
//! written as-is. A column vector (`cols == 1`) is written as one row.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use refcheck_core::Element;

use crate::error::DumpError;

/// File-name prefix of every dump.
pub const DUMP_PREFIX: &str = "out_";

/// Decimal places written for floating-point values.
pub const DUMP_PRECISION: usize = 5;

/// Path of the dump file for output `name` under `dir`.
pub fn dump_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{DUMP_PREFIX}{name}"))
}

/// Write `data` as a `rows x cols` text table to `out`.
///
/// # Errors
///
/// Returns [`DumpError::ShapeMismatch`] if `data` holds fewer than
/// `rows * cols` elements, or [`DumpError::Io`] if writing fails.
pub fn write_array<T: Element, W: Write>(
    out: &mut W,
    data: &[T],
    rows: usize,
    cols: usize,
) -> Result<(), DumpError> {
    let (rows, cols) = if cols == 1 { (1, rows) } else { (rows, cols) };
    let needed = rows.checked_mul(cols);
    if needed.is_none_or(|n| n > data.len()) {
        return Err(DumpError::ShapeMismatch {
            len: data.len(),
            rows,
            cols,
        });
    }

    for r in 0..rows {
        for v in &data[r * cols..(r + 1) * cols] {
            // Precision is ignored for integers.
            write!(out, "{v:.prec$} ", prec = DUMP_PRECISION)?;
        }
        writeln!(out)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Dump `data` to `<dir>/out_<name>`, replacing any existing file.
///
/// Returns the path written.
///
/// # Errors
///
/// As for [`write_array`], plus any error creating the file.
pub fn dump_array<T: Element>(
    dir: &Path,
    name: &str,
    data: &[T],
    rows: usize,
    cols: usize,
) -> Result<PathBuf, DumpError> {
    let path = dump_path(dir, name);
    let mut out = BufWriter::new(File::create(&path)?);
    write_array(&mut out, data, rows, cols)?;
    out.flush()?;
    log::debug!("dumped {} ({}x{}) to {}", name, rows, cols, path.display());
    Ok(path)
}
