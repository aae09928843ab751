//! Test utilities for refcheck development.
//!
//! Provides a log-capturing logger so tests can assert on the diagnostics
//! the checker emits, plus small kernel fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};
use refcheck_core::Element;

pub use fixtures::{ConstKernel, Kernel, PerturbedKernel, ScaleKernel};

/// One captured log record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
}

thread_local! {
    static CAPTURED: RefCell<Vec<CapturedRecord>> = const { RefCell::new(Vec::new()) };
}

/// Global logger that stores records in a per-thread buffer.
///
/// Records land on the thread that emitted them, so tests running in
/// parallel do not see each other's output.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        CAPTURED.with(|c| {
            c.borrow_mut().push(CapturedRecord {
                level: record.level(),
                target: record.target().to_string(),
                message: record.args().to_string(),
            })
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

fn install() {
    INIT.call_once(|| {
        // Another logger may already be installed by the harness; in that
        // case capture simply sees nothing.
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

/// Run `f` and return its result with every log record it emitted on
/// this thread.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedRecord>) {
    install();
    CAPTURED.with(|c| c.borrow_mut().clear());
    let result = f();
    let records = CAPTURED.with(|c| std::mem::take(&mut *c.borrow_mut()));
    (result, records)
}

/// Records at exactly `level`.
pub fn at_level(records: &[CapturedRecord], level: Level) -> Vec<&CapturedRecord> {
    records.iter().filter(|r| r.level == level).collect()
}

/// `0, 1, 2, ...` as `T`, for building distinguishable arrays.
///
/// # Panics
///
/// Panics if `n` exceeds `i16::MAX + 1`.
pub fn ramp<T: Element + From<i16>>(n: usize) -> Vec<T> {
    (0..n)
        .map(|i| T::from(i16::try_from(i).expect("ramp length exceeds i16 range")))
        .collect()
}
