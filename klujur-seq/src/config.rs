// klujur-seq - Sequence settings
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Thread-local settings for sequence construction and printing.
//!
//! Sequences are single-threaded (`Rc`-based), so the settings live per
//! thread, the same way `*print-length*` does in the evaluator.

use std::cell::Cell;

/// Default number of elements per chunk when batching a vector or range.
pub const DEFAULT_CHUNK_SIZE: usize = 32;

/// Number of elements printed for a lazy sequence when no print length is set.
pub const DEFAULT_LAZY_PRINT_LENGTH: usize = 32;

thread_local! {
    static CHUNK_SIZE: Cell<usize> = const { Cell::new(DEFAULT_CHUNK_SIZE) };

    /// Maximum number of elements to print in a sequence.
    /// None means the lazy default applies.
    static PRINT_LENGTH: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Get the current chunk size.
pub fn chunk_size() -> usize {
    CHUNK_SIZE.with(|c| c.get())
}

/// Set the chunk size used by sequences built after this call.
/// Values below 1 are clamped to 1. Returns the previous value.
pub fn set_chunk_size(size: usize) -> usize {
    CHUNK_SIZE.with(|c| c.replace(size.max(1)))
}

/// Get the current print-length setting.
pub fn print_length() -> Option<usize> {
    PRINT_LENGTH.with(|pl| pl.get())
}

/// Set the print-length setting. Returns the previous value.
pub fn set_print_length(len: Option<usize>) -> Option<usize> {
    PRINT_LENGTH.with(|pl| pl.replace(len))
}
