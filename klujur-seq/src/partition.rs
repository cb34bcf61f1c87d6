// klujur-seq - Partitioning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lazy grouping of consecutive elements into windows.
//!
//! Each group is an `im::Vector` of up to `n` elements, and windows start
//! `step` elements apart. A group is built only when its node is queried,
//! and building it forces at most `n` elements of the source.

use crate::seq::{Node, Seq};

/// Which short final group, if any, is emitted.
#[derive(Clone)]
enum Tail<T> {
    /// Drop it
    Drop,
    /// Fill it from a padding sequence, then stop
    Pad(Seq<T>),
    /// Keep it, and keep advancing
    Keep,
}

fn partition_seq<T: Clone + 'static>(
    src: Seq<T>,
    n: usize,
    step: i64,
    tail: Tail<T>,
) -> Seq<im::Vector<T>> {
    Seq::suspend(move || {
        if src.is_empty()? {
            return Ok(Node::Empty);
        }
        let mut group = im::Vector::new();
        for item in src.iter().take(n) {
            group.push_back(item?);
        }
        if group.len() < n {
            match &tail {
                Tail::Drop => return Ok(Node::Empty),
                Tail::Pad(pad) => {
                    for item in pad.iter().take(n - group.len()) {
                        group.push_back(item?);
                    }
                    return Ok(Node::Cons(group, Seq::empty()));
                }
                Tail::Keep => {}
            }
        }
        let rest = if step > 0 {
            partition_seq(src.drop(step as usize), n, step, tail.clone())
        } else if n == 0 {
            // Empty windows that never advance
            partition_seq(src.clone(), n, step, tail.clone())
        } else {
            Seq::empty()
        };
        Ok(Node::Cons(group, rest))
    })
}

fn partition_with<T: Clone + 'static>(
    src: &Seq<T>,
    n: i64,
    step: i64,
    tail: Tail<T>,
) -> Seq<im::Vector<T>> {
    if n < 0 {
        return Seq::empty();
    }
    partition_seq(src.clone(), n as usize, step, tail)
}

impl<T: Clone + 'static> Seq<T> {
    /// Groups of exactly `n` elements, each starting where the previous
    /// ended. A short final group is dropped.
    pub fn partition(&self, n: i64) -> Seq<im::Vector<T>> {
        self.partition_step(n, n)
    }

    /// Groups of exactly `n` elements starting `step` elements apart.
    ///
    /// A negative `n` yields nothing. With `n > 0` and `step <= 0` only the
    /// first group is produced.
    pub fn partition_step(&self, n: i64, step: i64) -> Seq<im::Vector<T>> {
        partition_with(self, n, step, Tail::Drop)
    }

    /// Like [`Seq::partition_step`], but a short final group is completed
    /// from `pad`. If `pad` runs out the group is emitted short. Nothing
    /// follows a padded group.
    pub fn partition_pad(&self, n: i64, step: i64, pad: &Seq<T>) -> Seq<im::Vector<T>> {
        partition_with(self, n, step, Tail::Pad(pad.clone()))
    }

    /// Groups of `n` elements, keeping short groups at the end.
    pub fn partition_all(&self, n: i64) -> Seq<im::Vector<T>> {
        self.partition_all_step(n, n)
    }

    /// Windows of up to `n` elements starting `step` apart, advancing until
    /// the source is exhausted.
    pub fn partition_all_step(&self, n: i64, step: i64) -> Seq<im::Vector<T>> {
        partition_with(self, n, step, Tail::Keep)
    }
}
