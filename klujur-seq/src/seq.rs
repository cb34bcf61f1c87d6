// klujur-seq - Sequence handle and nodes
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Core sequence type.
//!
//! A [`Seq`] is a cheap, cloneable handle to a suspension that produces a
//! [`Node`]. Forcing the handle realizes exactly one node: an empty
//! terminal, one element plus a rest handle, a whole chunk plus a rest
//! handle, or a view into text. Nodes are immutable once realized and are
//! shared by every handle that reaches them.

use std::fmt;
use std::rc::Rc;

use crate::chunk::Chunk;
use crate::config::{DEFAULT_LAZY_PRINT_LENGTH, print_length};
use crate::error::{Error, Result};
use crate::text::TextView;
use crate::thunk::Thunk;

// ============================================================================
// Nodes
// ============================================================================

/// One realized step of a sequence.
pub enum Node<T> {
    /// The end of the sequence
    Empty,
    /// A realized head and the rest of the sequence
    Cons(T, Seq<T>),
    /// A realized, non-empty chunk and the sequence beyond it
    Chunked(Chunk<T>, Seq<T>),
    /// The remainder of a text, read in place
    Text(TextView<T>),
}

impl<T: Clone> Clone for Node<T> {
    fn clone(&self) -> Self {
        match self {
            Node::Empty => Node::Empty,
            Node::Cons(head, rest) => Node::Cons(head.clone(), rest.clone()),
            Node::Chunked(chunk, rest) => Node::Chunked(chunk.clone(), rest.clone()),
            Node::Text(view) => Node::Text(view.clone()),
        }
    }
}

impl<T> Node<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }
}

// ============================================================================
// Sequence handle
// ============================================================================

/// An immutable, lazily realized, memoized sequence.
pub struct Seq<T> {
    cell: Rc<Thunk<Node<T>>>,
}

impl<T> Clone for Seq<T> {
    fn clone(&self) -> Self {
        Seq {
            cell: self.cell.clone(),
        }
    }
}

impl<T> Seq<T> {
    /// The empty sequence.
    pub fn empty() -> Self {
        Seq::from_node(Node::Empty)
    }

    /// Wrap an already realized node.
    pub(crate) fn from_node(node: Node<T>) -> Self {
        Seq {
            cell: Rc::new(Thunk::realized(node)),
        }
    }

    /// Defer the production of a node until the sequence is first queried.
    pub(crate) fn suspend<F>(body: F) -> Self
    where
        F: Fn() -> Result<Node<T>> + 'static,
    {
        Seq {
            cell: Rc::new(Thunk::new(body)),
        }
    }

    /// Prepend a realized element to `rest`.
    pub fn cons(head: T, rest: Seq<T>) -> Self {
        Seq::from_node(Node::Cons(head, rest))
    }

    /// Prepend a chunk to `rest`. An empty chunk yields `rest` itself.
    pub fn chunk_cons(chunk: Chunk<T>, rest: Seq<T>) -> Self {
        if chunk.is_empty() {
            rest
        } else {
            Seq::from_node(Node::Chunked(chunk, rest))
        }
    }

    /// Force this handle and return its node.
    pub fn node(&self) -> Result<&Node<T>> {
        self.cell.force()
    }

    /// Check whether this handle's own suspension has been forced.
    /// Says nothing about the rest of the sequence.
    pub fn is_realized(&self) -> bool {
        self.cell.is_realized()
    }

    /// Check whether two handles share the same suspension.
    pub fn ptr_eq(&self, other: &Seq<T>) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// Check whether the sequence has no elements.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.node()?.is_empty())
    }

    /// Detach the rest of a uniquely owned, realized handle.
    fn unlink(&mut self) -> Option<Seq<T>> {
        let cell = Rc::get_mut(&mut self.cell)?;
        match cell.take()? {
            Node::Cons(_, rest) | Node::Chunked(_, rest) => Some(rest),
            Node::Empty | Node::Text(_) => None,
        }
    }
}

impl<T: Clone + 'static> Seq<T> {
    /// A sequence whose nodes come from `body`, evaluated on first query.
    ///
    /// If `body` fails, the error is returned to the caller that forced it
    /// and `body` runs again on the next query.
    pub fn lazy<F>(body: F) -> Self
    where
        F: Fn() -> Result<Seq<T>> + 'static,
    {
        Seq::suspend(move || Ok(body()?.node()?.clone()))
    }

    /// Prepend `head` to the sequence produced later by `rest`.
    pub fn cons_with<F>(head: T, rest: F) -> Self
    where
        F: Fn() -> Result<Seq<T>> + 'static,
    {
        Seq::cons(head, Seq::lazy(rest))
    }

    /// The first element.
    pub fn first(&self) -> Result<T> {
        match self.node()? {
            Node::Empty => Err(Error::EmptySequence),
            Node::Cons(head, _) => Ok(head.clone()),
            Node::Chunked(chunk, _) => chunk.first().cloned().ok_or(Error::EmptySequence),
            Node::Text(view) => view.first().ok_or(Error::EmptySequence),
        }
    }

    /// Everything after the first element. The rest is not forced.
    pub fn rest(&self) -> Result<Seq<T>> {
        Ok(match self.node()? {
            Node::Empty => Seq::empty(),
            Node::Cons(_, rest) => rest.clone(),
            Node::Chunked(chunk, rest) => {
                if chunk.len() > 1 {
                    Seq::from_node(Node::Chunked(chunk.drop_first(1), rest.clone()))
                } else {
                    rest.clone()
                }
            }
            Node::Text(view) => view.rest(),
        })
    }

    /// First and rest in one step, or None at the end.
    pub(crate) fn split(&self) -> Result<Option<(T, Seq<T>)>> {
        if self.is_empty()? {
            return Ok(None);
        }
        Ok(Some((self.first()?, self.rest()?)))
    }
}

impl<T> Default for Seq<T> {
    fn default() -> Self {
        Seq::empty()
    }
}

impl<T> Drop for Seq<T> {
    // Unlink long realized chains iteratively instead of recursing per node
    fn drop(&mut self) {
        let mut next = self.unlink();
        while let Some(mut seq) = next {
            next = seq.unlink();
        }
    }
}

// ============================================================================
// Printing
// ============================================================================

/// Write the realized prefix of a sequence without forcing anything.
fn write_realized<T>(
    seq: &Seq<T>,
    f: &mut fmt::Formatter<'_>,
    write_elem: impl Fn(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    let max_display = print_length().unwrap_or(DEFAULT_LAZY_PRINT_LENGTH);
    let mut count = 0usize;
    let mut current = seq;

    write!(f, "(")?;
    let mut emit = |f: &mut fmt::Formatter<'_>, elem: &T| -> std::result::Result<bool, fmt::Error> {
        if count >= max_display {
            write!(f, "{}...", if count > 0 { " " } else { "" })?;
            return Ok(false);
        }
        if count > 0 {
            write!(f, " ")?;
        }
        write_elem(f, elem)?;
        count += 1;
        Ok(true)
    };

    loop {
        let Some(node) = current.cell.get() else {
            write!(f, "{}...", if count > 0 { " " } else { "" })?;
            break;
        };
        match node {
            Node::Empty => break,
            Node::Cons(head, rest) => {
                if !emit(f, head)? {
                    break;
                }
                current = rest;
            }
            Node::Chunked(chunk, rest) => {
                let mut open = true;
                for elem in chunk.iter() {
                    if !emit(f, elem)? {
                        open = false;
                        break;
                    }
                }
                if !open {
                    break;
                }
                current = rest;
            }
            Node::Text(view) => {
                for elem in view.iter() {
                    if !emit(f, &elem)? {
                        break;
                    }
                }
                break;
            }
        }
    }
    write!(f, ")")
}

impl<T: fmt::Display> fmt::Display for Seq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_realized(self, f, |f, elem| write!(f, "{}", elem))
    }
}

impl<T: fmt::Debug> fmt::Debug for Seq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_realized(self, f, |f, elem| write!(f, "{:?}", elem))
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Empty => write!(f, "Empty"),
            Node::Cons(head, rest) => write!(f, "Cons({:?}, {:?})", head, rest),
            Node::Chunked(chunk, rest) => write!(f, "Chunked({:?}, {:?})", chunk, rest),
            Node::Text(view) => write!(f, "Text({:?})", view),
        }
    }
}
