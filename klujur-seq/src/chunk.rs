// klujur-seq - Chunks
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Immutable, fixed-length views over a shared element buffer.
//!
//! A chunk is the unit of batch realization for chunked sequences. Dropping
//! elements from either end yields a new view over the same buffer; the
//! elements themselves are never copied or mutated.

use std::fmt;
use std::rc::Rc;

/// A view of `len` elements starting at `start` in a shared buffer.
pub struct Chunk<T> {
    buf: Rc<[T]>,
    start: usize,
    len: usize,
}

impl<T> Chunk<T> {
    /// Create a chunk owning the given elements.
    pub fn new(items: Vec<T>) -> Self {
        let len = items.len();
        Chunk {
            buf: Rc::from(items),
            start: 0,
            len,
        }
    }

    /// Create a view into an existing buffer.
    ///
    /// The range is clamped to the buffer.
    pub fn view(buf: Rc<[T]>, start: usize, len: usize) -> Self {
        let start = start.min(buf.len());
        let len = len.min(buf.len() - start);
        Chunk { buf, start, len }
    }

    /// Number of elements in the chunk.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the element at `index`, checked against the chunk's own length.
    pub fn nth(&self, index: usize) -> Option<&T> {
        if index < self.len {
            self.buf.get(self.start + index)
        } else {
            None
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.nth(0)
    }

    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.nth(i))
    }

    /// A view without the first `n` elements.
    pub fn drop_first(&self, n: usize) -> Self {
        let n = n.min(self.len);
        Chunk {
            buf: self.buf.clone(),
            start: self.start + n,
            len: self.len - n,
        }
    }

    /// A view without the last `n` elements.
    pub fn drop_last(&self, n: usize) -> Self {
        Chunk {
            buf: self.buf.clone(),
            start: self.start,
            len: self.len - n.min(self.len),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buf[self.start..self.start + self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Apply `f` to every element, producing a new chunk.
    pub fn map<U, F>(&self, f: F) -> Chunk<U>
    where
        F: FnMut(&T) -> U,
    {
        Chunk::new(self.iter().map(f).collect())
    }

    /// Check whether two chunks share the same backing buffer.
    pub fn shares_buffer(&self, other: &Chunk<T>) -> bool {
        Rc::ptr_eq(&self.buf, &other.buf)
    }
}

impl<T> Clone for Chunk<T> {
    fn clone(&self) -> Self {
        Chunk {
            buf: self.buf.clone(),
            start: self.start,
            len: self.len,
        }
    }
}

impl<T> From<Vec<T>> for Chunk<T> {
    fn from(items: Vec<T>) -> Self {
        Chunk::new(items)
    }
}

impl<T: PartialEq> PartialEq for Chunk<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for Chunk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<Chunk {:?}>", self.as_slice())
    }
}
