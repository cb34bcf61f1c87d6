// klujur-seq - Sequence sources
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Ways to produce a sequence: batches, external iterators and generators.
//!
//! Vectors become chunked sequences whose chunks are views over a single
//! shared buffer, `chunk_size()` elements at a time. External iterators are
//! pulled lazily, one element per node. `iterate` and `range` are infinite
//! or bounded generators built from eager-head nodes.

use std::cell::RefCell;
use std::rc::Rc;

use num_traits::{CheckedAdd, One, Zero};

use crate::chunk::Chunk;
use crate::config::chunk_size;
use crate::seq::{Node, Seq};

// ============================================================================
// Batches
// ============================================================================

/// Build the chunked node starting at `start`, with the rest suspended.
fn chunked_node<T: 'static>(buf: Rc<[T]>, start: usize, size: usize) -> Node<T> {
    if start >= buf.len() {
        return Node::Empty;
    }
    let chunk = Chunk::view(buf.clone(), start, size);
    let next = start + chunk.len();
    let rest = if next >= buf.len() {
        Seq::empty()
    } else {
        Seq::suspend(move || Ok(chunked_node(buf.clone(), next, size)))
    };
    Node::Chunked(chunk, rest)
}

impl<T: 'static> Seq<T> {
    /// A chunked sequence over `items`, without copying them.
    pub fn from_vec(items: Vec<T>) -> Seq<T> {
        let buf: Rc<[T]> = Rc::from(items);
        Seq::from_node(chunked_node(buf, 0, chunk_size()))
    }

    /// A sequence pulling from `iter` lazily, one element per node.
    ///
    /// Each element is pulled at most once, when the node holding it is
    /// first queried.
    pub fn from_iterator<I>(iter: I) -> Seq<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        pull(Rc::new(RefCell::new(iter.into_iter())))
    }
}

fn pull<T, I>(source: Rc<RefCell<I>>) -> Seq<T>
where
    T: 'static,
    I: Iterator<Item = T> + 'static,
{
    Seq::suspend(move || {
        let next = source.borrow_mut().next();
        Ok(match next {
            Some(item) => Node::Cons(item, pull(source.clone())),
            None => Node::Empty,
        })
    })
}

impl<T: Clone + 'static> Seq<T> {
    /// A chunked sequence over a copy of `items`.
    pub fn from_slice(items: &[T]) -> Seq<T> {
        Seq::from_vec(items.to_vec())
    }
}

impl<T: 'static> From<Vec<T>> for Seq<T> {
    fn from(items: Vec<T>) -> Self {
        Seq::from_vec(items)
    }
}

impl<T: Clone + 'static> From<im::Vector<T>> for Seq<T> {
    fn from(items: im::Vector<T>) -> Self {
        Seq::from_vec(items.into_iter().collect())
    }
}

impl<T: 'static> FromIterator<T> for Seq<T> {
    /// Collects eagerly into a chunked sequence.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Seq::from_vec(iter.into_iter().collect())
    }
}

/// Create a chunked sequence from literal elements.
///
/// ```
/// use klujur_seq::{Seq, seq};
///
/// let s: Seq<i32> = seq![1, 2, 3];
/// assert_eq!(s.count().unwrap(), 3);
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::Seq::empty()
    };
    ($($x:expr),+ $(,)?) => {
        $crate::Seq::from_vec(vec![$($x),+])
    };
}

// ============================================================================
// Generators
// ============================================================================

fn iterate_rest<T, F>(prev: T, f: Rc<F>) -> Seq<T>
where
    T: Clone + 'static,
    F: Fn(&T) -> T + 'static,
{
    Seq::suspend(move || {
        let next = f(&prev);
        Ok(Node::Cons(next.clone(), iterate_rest(next, f.clone())))
    })
}

impl<T: Clone + 'static> Seq<T> {
    /// The infinite sequence `seed, f(seed), f(f(seed)), ...`.
    ///
    /// Each application of `f` runs once, however often the sequence is
    /// traversed.
    pub fn iterate<F>(seed: T, f: F) -> Seq<T>
    where
        F: Fn(&T) -> T + 'static,
    {
        let rest = iterate_rest(seed.clone(), Rc::new(f));
        Seq::cons(seed, rest)
    }
}

/// Where a numeric range stops.
#[derive(Clone, Copy)]
struct Bound<T> {
    end: Option<T>,
    ascending: bool,
}

impl<T: PartialOrd> Bound<T> {
    fn admits(&self, x: &T) -> bool {
        match &self.end {
            None => true,
            Some(end) if self.ascending => x < end,
            Some(end) => x > end,
        }
    }
}

/// The range from `value` onwards. Ends at the bound, or where the next
/// step would leave the range of `T`.
fn range_seq<T>(value: T, step: T, bound: Bound<T>) -> Seq<T>
where
    T: Copy + PartialOrd + CheckedAdd + 'static,
{
    Seq::suspend(move || {
        if !bound.admits(&value) {
            return Ok(Node::Empty);
        }
        let rest = match value.checked_add(&step) {
            Some(next) => range_seq(next, step, bound),
            None => Seq::empty(),
        };
        Ok(Node::Cons(value, rest))
    })
}

impl<T> Seq<T>
where
    T: Copy + PartialOrd + Zero + One + CheckedAdd + 'static,
{
    /// `start, start + step, ...` up to but excluding `end`.
    ///
    /// A negative step counts down towards `end`. A zero step repeats
    /// `start` forever when `start < end`.
    pub fn range(start: T, end: T, step: T) -> Seq<T> {
        let bound = Bound {
            end: Some(end),
            ascending: step >= T::zero(),
        };
        range_seq(start, step, bound)
    }

    /// `0, 1, ...` up to but excluding `end`.
    pub fn range_to(end: T) -> Seq<T> {
        Seq::range(T::zero(), end, T::one())
    }

    /// `start, start + 1, ...`, ending only at the maximum of `T`.
    pub fn range_from(start: T) -> Seq<T> {
        let bound = Bound {
            end: None,
            ascending: true,
        };
        range_seq(start, T::one(), bound)
    }
}
