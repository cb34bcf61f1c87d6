// klujur-seq - Lazy sequence transformations
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lazy transformations: map, filter, mapcat, take, drop, take-while,
//! drop-while, concat, distinct, reductions.
//!
//! Every transformation returns immediately with an unforced sequence. When
//! the result is queried, one node of the source is examined:
//!
//! - eager-head nodes are handled one element at a time;
//! - chunked nodes are processed a whole chunk at once, and only the step to
//!   the next chunk stays lazy;
//! - text nodes are narrowed in place where the result is still text, or
//!   realized into a single chunk otherwise.
//!
//! Steps that skip input (filter, drop, drop-while, distinct, mapcat) loop
//! inside one suspension rather than recursing, so long runs of skipped
//! elements use constant stack.

use std::hash::Hash;
use std::rc::Rc;

use crate::chunk::Chunk;
use crate::error::Result;
use crate::seq::{Node, Seq};

// ============================================================================
// map
// ============================================================================

fn map_seq<T, U, F>(src: Seq<T>, f: Rc<F>) -> Seq<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
    F: Fn(&T) -> U + 'static,
{
    Seq::suspend(move || {
        Ok(match src.node()? {
            Node::Empty => Node::Empty,
            Node::Cons(head, rest) => Node::Cons(f(head), map_seq(rest.clone(), f.clone())),
            Node::Chunked(chunk, rest) => {
                Node::Chunked(chunk.map(|x| f(x)), map_seq(rest.clone(), f.clone()))
            }
            Node::Text(view) => {
                let mapped: Vec<U> = view.iter().map(|x| f(&x)).collect();
                Node::Chunked(Chunk::new(mapped), Seq::empty())
            }
        })
    })
}

/// Zip one realized batch of `left` against `right`.
fn zip_chunk<T, S, U, F>(chunk: &Chunk<T>, rest: Seq<T>, right: &Seq<S>, f: &Rc<F>) -> Result<Node<U>>
where
    T: Clone + 'static,
    S: Clone + 'static,
    U: Clone + 'static,
    F: Fn(&T, &S) -> U + 'static,
{
    let mut out = Vec::with_capacity(chunk.len());
    for (x, y) in chunk.iter().zip(right.iter()) {
        out.push(f(x, &y?));
    }
    if out.is_empty() {
        return Ok(Node::Empty);
    }
    if out.len() < chunk.len() {
        // The companion ran out inside this chunk
        return Ok(Node::Chunked(Chunk::new(out), Seq::empty()));
    }
    let companion = right.drop(chunk.len());
    Ok(Node::Chunked(
        Chunk::new(out),
        zip_seq(rest, companion, f.clone()),
    ))
}

fn zip_seq<T, S, U, F>(left: Seq<T>, right: Seq<S>, f: Rc<F>) -> Seq<U>
where
    T: Clone + 'static,
    S: Clone + 'static,
    U: Clone + 'static,
    F: Fn(&T, &S) -> U + 'static,
{
    Seq::suspend(move || match left.node()? {
        Node::Empty => Ok(Node::Empty),
        Node::Cons(head, rest) => Ok(match right.split()? {
            None => Node::Empty,
            Some((other, other_rest)) => Node::Cons(
                f(head, &other),
                zip_seq(rest.clone(), other_rest, f.clone()),
            ),
        }),
        Node::Chunked(chunk, rest) => zip_chunk(chunk, rest.clone(), &right, &f),
        Node::Text(view) => zip_chunk(&view.to_chunk(), Seq::empty(), &right, &f),
    })
}

// ============================================================================
// filter
// ============================================================================

fn filter_seq<T, P>(src: Seq<T>, pred: Rc<P>) -> Seq<T>
where
    T: Clone + 'static,
    P: Fn(&T) -> bool + 'static,
{
    Seq::suspend(move || {
        let mut current = src.clone();
        loop {
            let next = match current.node()? {
                Node::Empty => return Ok(Node::Empty),
                Node::Cons(head, rest) => {
                    if pred(head) {
                        return Ok(Node::Cons(
                            head.clone(),
                            filter_seq(rest.clone(), pred.clone()),
                        ));
                    }
                    rest.clone()
                }
                Node::Chunked(chunk, rest) => {
                    let kept: Vec<T> = chunk.iter().filter(|&x| pred(x)).cloned().collect();
                    if kept.len() == chunk.len() {
                        return Ok(Node::Chunked(
                            chunk.clone(),
                            filter_seq(rest.clone(), pred.clone()),
                        ));
                    }
                    if !kept.is_empty() {
                        return Ok(Node::Chunked(
                            Chunk::new(kept),
                            filter_seq(rest.clone(), pred.clone()),
                        ));
                    }
                    // No zero-length chunks: carry on into the rest
                    rest.clone()
                }
                Node::Text(view) => {
                    let kept: Vec<T> = view.iter().filter(|x| pred(x)).collect();
                    return Ok(match kept.is_empty() {
                        true => Node::Empty,
                        false => Node::Chunked(Chunk::new(kept), Seq::empty()),
                    });
                }
            };
            current = next;
        }
    })
}

// ============================================================================
// mapcat
// ============================================================================

fn mapcat_seq<T, U, S, F>(src: Seq<T>, f: Rc<F>) -> Seq<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
    S: Into<Seq<U>>,
    F: Fn(&T) -> S + 'static,
{
    Seq::suspend(move || {
        let mut current = src.clone();
        loop {
            let Some((head, rest)) = current.split()? else {
                return Ok(Node::Empty);
            };
            let inner: Seq<U> = f(&head).into();
            if !inner.is_empty()? {
                let joined = concat_seq(inner, mapcat_seq(rest, f.clone()));
                return Ok(joined.node()?.clone());
            }
            current = rest;
        }
    })
}

fn mapcat_zip_seq<T, S, U, I, F>(left: Seq<T>, right: Seq<S>, f: Rc<F>) -> Seq<U>
where
    T: Clone + 'static,
    S: Clone + 'static,
    U: Clone + 'static,
    I: Into<Seq<U>>,
    F: Fn(&T, &S) -> I + 'static,
{
    Seq::suspend(move || {
        let mut left = left.clone();
        let mut right = right.clone();
        loop {
            let Some((x, left_rest)) = left.split()? else {
                return Ok(Node::Empty);
            };
            let Some((y, right_rest)) = right.split()? else {
                return Ok(Node::Empty);
            };
            let inner: Seq<U> = f(&x, &y).into();
            if !inner.is_empty()? {
                let joined = concat_seq(inner, mapcat_zip_seq(left_rest, right_rest, f.clone()));
                return Ok(joined.node()?.clone());
            }
            left = left_rest;
            right = right_rest;
        }
    })
}

// ============================================================================
// take / drop
// ============================================================================

fn take_seq<T: Clone + 'static>(src: Seq<T>, n: usize) -> Seq<T> {
    if n == 0 {
        return Seq::empty();
    }
    Seq::suspend(move || {
        Ok(match src.node()? {
            Node::Empty => Node::Empty,
            Node::Cons(head, rest) => Node::Cons(head.clone(), take_seq(rest.clone(), n - 1)),
            Node::Chunked(chunk, rest) => {
                if n >= chunk.len() {
                    Node::Chunked(chunk.clone(), take_seq(rest.clone(), n - chunk.len()))
                } else {
                    // A sub-chunk prefix does not need to stay chunked
                    chunk.as_slice()[..n]
                        .iter()
                        .rev()
                        .fold(Node::Empty, |acc, x| {
                            Node::Cons(x.clone(), Seq::from_node(acc))
                        })
                }
            }
            Node::Text(view) => view.take(n),
        })
    })
}

fn drop_seq<T: Clone + 'static>(src: Seq<T>, n: usize) -> Seq<T> {
    if n == 0 {
        return src;
    }
    Seq::suspend(move || {
        let mut remaining = n;
        let mut current = src.clone();
        loop {
            if remaining == 0 {
                return Ok(current.node()?.clone());
            }
            let next = match current.node()? {
                Node::Empty => return Ok(Node::Empty),
                Node::Cons(_, rest) => {
                    remaining -= 1;
                    rest.clone()
                }
                Node::Chunked(chunk, rest) => {
                    if remaining < chunk.len() {
                        return Ok(Node::Chunked(chunk.drop_first(remaining), rest.clone()));
                    }
                    remaining -= chunk.len();
                    rest.clone()
                }
                Node::Text(view) => return Ok(view.drop(remaining)),
            };
            current = next;
        }
    })
}

// ============================================================================
// take-while / drop-while
// ============================================================================

fn take_while_seq<T, P>(src: Seq<T>, pred: Rc<P>) -> Seq<T>
where
    T: Clone + 'static,
    P: Fn(&T) -> bool + 'static,
{
    Seq::suspend(move || {
        Ok(match src.node()? {
            Node::Empty => Node::Empty,
            Node::Cons(head, rest) => {
                if pred(head) {
                    Node::Cons(head.clone(), take_while_seq(rest.clone(), pred.clone()))
                } else {
                    Node::Empty
                }
            }
            Node::Chunked(chunk, rest) => {
                let end = chunk.iter().take_while(|&x| pred(x)).count();
                if end == 0 {
                    Node::Empty
                } else if end == chunk.len() {
                    Node::Chunked(chunk.clone(), take_while_seq(rest.clone(), pred.clone()))
                } else {
                    // Matching stopped inside the chunk; the rest is never forced
                    Node::Chunked(chunk.drop_last(chunk.len() - end), Seq::empty())
                }
            }
            Node::Text(view) => view.take_while(|x| pred(x)),
        })
    })
}

fn drop_while_seq<T, P>(src: Seq<T>, pred: Rc<P>) -> Seq<T>
where
    T: Clone + 'static,
    P: Fn(&T) -> bool + 'static,
{
    Seq::suspend(move || {
        let mut current = src.clone();
        loop {
            let next = match current.node()? {
                Node::Empty => return Ok(Node::Empty),
                Node::Cons(head, rest) => {
                    if !pred(head) {
                        return Ok(Node::Cons(head.clone(), rest.clone()));
                    }
                    rest.clone()
                }
                Node::Chunked(chunk, rest) => {
                    let matched = chunk.iter().take_while(|&x| pred(x)).count();
                    if matched < chunk.len() {
                        return Ok(Node::Chunked(chunk.drop_first(matched), rest.clone()));
                    }
                    rest.clone()
                }
                Node::Text(view) => return Ok(view.drop_while(|x| pred(x))),
            };
            current = next;
        }
    })
}

// ============================================================================
// concat
// ============================================================================

fn concat_seq<T: Clone + 'static>(front: Seq<T>, back: Seq<T>) -> Seq<T> {
    Seq::suspend(move || {
        Ok(match front.node()? {
            Node::Empty => back.node()?.clone(),
            Node::Cons(head, rest) => Node::Cons(head.clone(), concat_seq(rest.clone(), back.clone())),
            Node::Chunked(chunk, rest) => {
                Node::Chunked(chunk.clone(), concat_seq(rest.clone(), back.clone()))
            }
            Node::Text(view) => Node::Chunked(view.to_chunk(), back.clone()),
        })
    })
}

// ============================================================================
// distinct
// ============================================================================

fn distinct_seq<T>(src: Seq<T>, seen: im::HashSet<T>) -> Seq<T>
where
    T: Clone + Hash + Eq + 'static,
{
    Seq::suspend(move || {
        let mut current = src.clone();
        loop {
            let next = match current.node()? {
                Node::Empty => return Ok(Node::Empty),
                Node::Cons(head, rest) => {
                    if !seen.contains(head) {
                        return Ok(Node::Cons(
                            head.clone(),
                            distinct_seq(rest.clone(), seen.update(head.clone())),
                        ));
                    }
                    rest.clone()
                }
                Node::Chunked(chunk, rest) => {
                    let mut seen_now = seen.clone();
                    let mut kept = Vec::new();
                    for x in chunk.iter() {
                        if seen_now.insert(x.clone()).is_none() {
                            kept.push(x.clone());
                        }
                    }
                    if !kept.is_empty() {
                        return Ok(Node::Chunked(
                            Chunk::new(kept),
                            distinct_seq(rest.clone(), seen_now),
                        ));
                    }
                    rest.clone()
                }
                Node::Text(view) => return Ok(view.distinct(&seen)),
            };
            current = next;
        }
    })
}

// ============================================================================
// reductions
// ============================================================================

/// Scan one realized batch: `init` followed by every accumulator but the
/// last, which seeds the scan of `rest`.
fn reductions_chunk<T, U, F>(chunk: &Chunk<T>, rest: Seq<T>, init: &U, f: &Rc<F>) -> Node<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
    F: Fn(&U, &T) -> U + 'static,
{
    let mut acc = Vec::with_capacity(chunk.len());
    let mut inter = init.clone();
    for x in chunk.iter() {
        let next = f(&inter, x);
        acc.push(inter);
        inter = next;
    }
    Node::Chunked(Chunk::new(acc), reductions_seq(rest, inter, f.clone()))
}

fn reductions_seq<T, U, F>(src: Seq<T>, init: U, f: Rc<F>) -> Seq<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
    F: Fn(&U, &T) -> U + 'static,
{
    Seq::suspend(move || {
        Ok(match src.node()? {
            Node::Empty => Node::Cons(init.clone(), Seq::empty()),
            Node::Cons(head, rest) => {
                let next = f(&init, head);
                Node::Cons(init.clone(), reductions_seq(rest.clone(), next, f.clone()))
            }
            Node::Chunked(chunk, rest) => reductions_chunk(chunk, rest.clone(), &init, &f),
            Node::Text(view) => reductions_chunk(&view.to_chunk(), Seq::empty(), &init, &f),
        })
    })
}

// ============================================================================
// Public API
// ============================================================================

impl<T: Clone + 'static> Seq<T> {
    /// Apply `f` to every element.
    pub fn map<U, F>(&self, f: F) -> Seq<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> U + 'static,
    {
        map_seq(self.clone(), Rc::new(f))
    }

    /// Apply `f` to pairs of elements from `self` and `other`, stopping at
    /// the end of the shorter sequence.
    pub fn map_with<S, U, F>(&self, other: &Seq<S>, f: F) -> Seq<U>
    where
        S: Clone + 'static,
        U: Clone + 'static,
        F: Fn(&T, &S) -> U + 'static,
    {
        zip_seq(self.clone(), other.clone(), Rc::new(f))
    }

    /// Elements for which `pred` returns true.
    pub fn filter<P>(&self, pred: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        filter_seq(self.clone(), Rc::new(pred))
    }

    /// Elements for which `pred` returns false.
    pub fn remove<P>(&self, pred: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.filter(move |x| !pred(x))
    }

    /// Map every element to a sequence and concatenate the results.
    /// Elements that expand to nothing are skipped.
    pub fn mapcat<U, S, F>(&self, f: F) -> Seq<U>
    where
        U: Clone + 'static,
        S: Into<Seq<U>>,
        F: Fn(&T) -> S + 'static,
    {
        mapcat_seq(self.clone(), Rc::new(f))
    }

    /// Two-sequence mapcat, stopping at the end of the shorter sequence.
    pub fn mapcat_with<S, U, I, F>(&self, other: &Seq<S>, f: F) -> Seq<U>
    where
        S: Clone + 'static,
        U: Clone + 'static,
        I: Into<Seq<U>>,
        F: Fn(&T, &S) -> I + 'static,
    {
        mapcat_zip_seq(self.clone(), other.clone(), Rc::new(f))
    }

    /// The first `n` elements. Nothing past index `n - 1` is ever forced.
    pub fn take(&self, n: usize) -> Seq<T> {
        take_seq(self.clone(), n)
    }

    /// Everything after the first `n` elements.
    pub fn drop(&self, n: usize) -> Seq<T> {
        drop_seq(self.clone(), n)
    }

    /// The longest prefix whose elements satisfy `pred`.
    pub fn take_while<P>(&self, pred: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        take_while_seq(self.clone(), Rc::new(pred))
    }

    /// Everything from the first element that fails `pred`.
    pub fn drop_while<P>(&self, pred: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        drop_while_seq(self.clone(), Rc::new(pred))
    }

    /// The elements of `self` followed by the elements of `other`.
    pub fn concat(&self, other: &Seq<T>) -> Seq<T> {
        concat_seq(self.clone(), other.clone())
    }

    /// First occurrences only, in encounter order.
    pub fn distinct(&self) -> Seq<T>
    where
        T: Hash + Eq,
    {
        distinct_seq(self.clone(), im::HashSet::new())
    }

    /// Every intermediate accumulator of folding `f` from `init`, starting
    /// with `init` itself.
    pub fn reductions<U, F>(&self, init: U, f: F) -> Seq<U>
    where
        U: Clone + 'static,
        F: Fn(&U, &T) -> U + 'static,
    {
        reductions_seq(self.clone(), init, Rc::new(f))
    }

    /// Like [`Seq::reductions`], seeded with the first element.
    /// Empty for an empty sequence.
    pub fn reductions1<F>(&self, f: F) -> Seq<T>
    where
        F: Fn(&T, &T) -> T + 'static,
    {
        let src = self.clone();
        let f = Rc::new(f);
        Seq::suspend(move || {
            Ok(match src.split()? {
                None => Node::Empty,
                Some((head, rest)) => reductions_seq(rest, head, f.clone()).node()?.clone(),
            })
        })
    }
}
