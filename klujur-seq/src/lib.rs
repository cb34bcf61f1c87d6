// klujur-seq - Lazy, memoized, chunked sequences
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # klujur-seq
//!
//! Immutable, lazily evaluated sequences over vectors, generators, external
//! iterators and text.
//!
//! A [`Seq`] is realized one [`Node`] at a time: an eager head with a lazy
//! rest, a whole [`Chunk`] with a lazy rest, or a [`TextView`] read in place.
//! Every node is computed at most once and shared by every handle that
//! reaches it, and no operation forces more of its source than the caller
//! asks for.
//!
//! ```
//! use klujur_seq::Seq;
//!
//! let evens = Seq::range_from(0).filter(|x| x % 2 == 0);
//! let sums = evens.reductions(0, |acc, x| acc + x);
//! assert_eq!(sums.take(4).to_vec().unwrap(), vec![0, 0, 2, 6]);
//! ```
//!
//! Sequences are built on `Rc` and belong to one thread.

pub mod chunk;
pub mod config;
pub mod error;
pub mod iter;
pub mod seq;
pub mod text;
pub mod thunk;

mod convert;
mod eager;
mod fold;
mod generators;
mod partition;
mod transform;

pub use chunk::Chunk;
pub use config::{chunk_size, print_length, set_chunk_size, set_print_length};
pub use convert::MapEntry;
pub use error::{Error, Result};
pub use iter::Iter;
pub use seq::{Node, Seq};
pub use text::TextView;
pub use thunk::Thunk;
