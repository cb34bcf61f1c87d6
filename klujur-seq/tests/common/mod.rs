// klujur-seq - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers for sequence integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`collect`] - Materialize a finite sequence, panicking on error
//! - [`cons_list`] - Build an eager-head sequence from a slice
//! - [`chunked`] - Build a chunked sequence with an explicit chunk size
//! - [`counted_naturals`] - Naturals that count generator calls
//! - [`init_tracing`] - Route `tracing` output to the test writer
//!
//! # Macros
//!
//! - [`assert_seq!`] - Assert that a sequence holds exactly the given elements

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

pub use klujur_seq::{Error, Node, Result, Seq, set_chunk_size};

/// Materialize a finite sequence.
#[must_use]
pub fn collect<T: Clone + 'static>(seq: &Seq<T>) -> Vec<T> {
    seq.to_vec().expect("sequence should materialize")
}

/// An eager-head sequence holding `items`.
#[must_use]
pub fn cons_list<T: Clone + 'static>(items: &[T]) -> Seq<T> {
    items
        .iter()
        .rev()
        .fold(Seq::empty(), |acc, x| Seq::cons(x.clone(), acc))
}

/// A chunked sequence over `items`, `size` elements per chunk.
#[must_use]
pub fn chunked<T: 'static>(items: Vec<T>, size: usize) -> Seq<T> {
    let previous = set_chunk_size(size);
    let seq = Seq::from_vec(items);
    set_chunk_size(previous);
    seq
}

/// `0, 1, 2, ...` together with the number of generator calls so far.
#[must_use]
pub fn counted_naturals() -> (Seq<i64>, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let seq = Seq::iterate(0i64, move |x| {
        counter.set(counter.get() + 1);
        x + 1
    });
    (seq, calls)
}

/// Install a subscriber that writes through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Assert that a sequence materializes to exactly the given elements.
#[macro_export]
macro_rules! assert_seq {
    ($seq:expr, [$($x:expr),* $(,)?]) => {
        let result = $seq.to_vec();
        assert!(
            result.is_ok(),
            "Failed to materialize '{}': {:?}",
            stringify!($seq),
            result.as_ref().err()
        );
        assert_eq!(
            result.unwrap(),
            vec![$($x),*],
            "Sequence '{}' did not match expected",
            stringify!($seq)
        );
    };
}
