// klujur-seq - Sequence iteration
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Pull-based iteration over a sequence.
//!
//! The iterator walks chunks and text by index, so only the suspensions
//! between nodes are forced. Each item is a `Result` because pulling the next
//! node may run a rest producer that fails; the iterator stops after the
//! first error.

use crate::error::Result;
use crate::seq::{Node, Seq};

/// Iterator over the elements of a [`Seq`].
pub struct Iter<T> {
    current: Seq<T>,
    /// Element offset into a chunk, or byte offset into a text view.
    pos: usize,
    done: bool,
}

enum Step<T> {
    /// Yield an element and move `pos` forward by the given width
    Yield(T, usize),
    /// Yield an element and move on to the rest
    Cons(T, Seq<T>),
    Advance(Seq<T>),
    Finish,
}

impl<T> Iter<T> {
    pub(crate) fn new(seq: Seq<T>) -> Self {
        Iter {
            current: seq,
            pos: 0,
            done: false,
        }
    }
}

impl<T: Clone + 'static> Iterator for Iter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let step = match self.current.node() {
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
                Ok(Node::Empty) => Step::Finish,
                Ok(Node::Cons(head, rest)) => Step::Cons(head.clone(), rest.clone()),
                Ok(Node::Chunked(chunk, rest)) => match chunk.nth(self.pos) {
                    Some(elem) => Step::Yield(elem.clone(), 1),
                    None => Step::Advance(rest.clone()),
                },
                Ok(Node::Text(view)) => match view.char_at(self.pos) {
                    Some((elem, width)) => Step::Yield(elem, width),
                    None => Step::Finish,
                },
            };
            match step {
                Step::Yield(elem, width) => {
                    self.pos += width;
                    return Some(Ok(elem));
                }
                Step::Cons(head, rest) => {
                    self.current = rest;
                    return Some(Ok(head));
                }
                Step::Advance(rest) => {
                    self.current = rest;
                    self.pos = 0;
                }
                Step::Finish => self.done = true,
            }
        }
        None
    }
}

impl<T: Clone + 'static> Seq<T> {
    /// Iterate over the elements, forcing the sequence as it goes.
    pub fn iter(&self) -> Iter<T> {
        Iter::new(self.clone())
    }
}

impl<T: Clone + 'static> IntoIterator for &Seq<T> {
    type Item = Result<T>;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone + 'static> IntoIterator for Seq<T> {
    type Item = Result<T>;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}
