// klujur-seq - Terminal operations
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Operations that consume a sequence and return a single value: counting,
//! indexing, folds, quantifiers, extrema and searches.
//!
//! Quantifiers and searches stop pulling as soon as the answer is known.
//! Everything else walks the whole sequence and so needs a finite one.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::seq::{Node, Seq};

impl<T: Clone + 'static> Seq<T> {
    /// Number of elements. Chunks and text are counted without visiting
    /// each element.
    pub fn count(&self) -> Result<usize> {
        let mut total = 0usize;
        let mut current = self.clone();
        loop {
            let next = match current.node()? {
                Node::Empty => return Ok(total),
                Node::Cons(_, rest) => {
                    total += 1;
                    rest.clone()
                }
                Node::Chunked(chunk, rest) => {
                    total += chunk.len();
                    rest.clone()
                }
                Node::Text(view) => return Ok(total + view.len()),
            };
            current = next;
        }
    }

    /// The element at `index`.
    ///
    /// Fails with `IndexOutOfRange` for a negative index or one past the
    /// end. Whole chunks before the index are skipped without being read.
    pub fn nth(&self, index: i64) -> Result<T> {
        if index < 0 {
            return Err(Error::index(index));
        }
        let mut remaining = index as usize;
        let mut current = self.clone();
        loop {
            let next = match current.node()? {
                Node::Empty => return Err(Error::index(index)),
                Node::Cons(head, rest) => {
                    if remaining == 0 {
                        return Ok(head.clone());
                    }
                    remaining -= 1;
                    rest.clone()
                }
                Node::Chunked(chunk, rest) => {
                    if let Some(elem) = chunk.nth(remaining) {
                        return Ok(elem.clone());
                    }
                    remaining -= chunk.len();
                    rest.clone()
                }
                Node::Text(view) => return view.nth(remaining).ok_or(Error::index(index)),
            };
            current = next;
        }
    }

    /// The element at `index`, or `default` when out of range.
    pub fn nth_or(&self, index: i64, default: T) -> Result<T> {
        match self.nth(index) {
            Err(Error::IndexOutOfRange { .. }) => Ok(default),
            other => other,
        }
    }

    /// The element at `index`, if there is one.
    pub fn find(&self, index: i64) -> Result<Option<T>> {
        match self.nth(index) {
            Ok(elem) => Ok(Some(elem)),
            Err(Error::IndexOutOfRange { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Fold every element into `init`.
    pub fn reduce<U, F>(&self, init: U, mut f: F) -> Result<U>
    where
        F: FnMut(U, &T) -> U,
    {
        self.iter().try_fold(init, |acc, item| Ok(f(acc, &item?)))
    }

    /// Fold seeded by the first element. `None` for an empty sequence.
    pub fn reduce1<F>(&self, f: F) -> Result<Option<T>>
    where
        F: FnMut(T, &T) -> T,
    {
        match self.split()? {
            None => Ok(None),
            Some((head, rest)) => rest.reduce(head, f).map(Some),
        }
    }

    /// Check whether any element satisfies `pred`, stopping at the first
    /// that does.
    pub fn some<P>(&self, mut pred: P) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        for item in self.iter() {
            if pred(&item?) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Check whether every element satisfies `pred`, stopping at the first
    /// that does not.
    pub fn every<P>(&self, mut pred: P) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        Ok(!self.some(|x| !pred(x))?)
    }

    /// Check whether no element satisfies `pred`.
    pub fn not_any<P>(&self, pred: P) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        Ok(!self.some(pred)?)
    }

    /// The first element, or `None` if empty.
    pub fn find_first(&self) -> Result<Option<T>> {
        Ok(self.split()?.map(|(head, _)| head))
    }

    /// The first element satisfying `pred`.
    pub fn find_first_by<P>(&self, mut pred: P) -> Result<Option<T>>
    where
        P: FnMut(&T) -> bool,
    {
        for item in self.iter() {
            let item = item?;
            if pred(&item) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    /// Greatest element under `cmp`; the last of equal maxima wins.
    pub fn max_by<F>(&self, mut cmp: F) -> Result<Option<T>>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.reduce(None, |best, x| match best {
            Some(b) if cmp(x, &b) == Ordering::Less => Some(b),
            _ => Some(x.clone()),
        })
    }

    /// Least element under `cmp`; the first of equal minima wins.
    pub fn min_by<F>(&self, mut cmp: F) -> Result<Option<T>>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.reduce(None, |best, x| match best {
            Some(b) if cmp(x, &b) != Ordering::Less => Some(b),
            _ => Some(x.clone()),
        })
    }

    pub fn max(&self) -> Result<Option<T>>
    where
        T: Ord,
    {
        self.max_by(T::cmp)
    }

    pub fn min(&self) -> Result<Option<T>>
    where
        T: Ord,
    {
        self.min_by(T::cmp)
    }

    /// Element with the greatest `key`.
    pub fn max_key<K, F>(&self, key: F) -> Result<Option<T>>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        self.max_by(|a, b| key(a).cmp(&key(b)))
    }

    /// Element with the least `key`.
    pub fn min_key<K, F>(&self, key: F) -> Result<Option<T>>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        self.min_by(|a, b| key(a).cmp(&key(b)))
    }

    /// Walk the sequence for side effects.
    pub fn run<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(&T),
    {
        for item in self.iter() {
            f(&item?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::set_chunk_size;
    use std::cell::Cell;
    use std::rc::Rc;

    fn chunked(items: Vec<i64>, size: usize) -> Seq<i64> {
        let previous = set_chunk_size(size);
        let seq = Seq::from_vec(items);
        set_chunk_size(previous);
        seq
    }

    #[test]
    fn test_count() {
        assert_eq!(chunked((0..10).collect(), 3).count().unwrap(), 10);
        assert_eq!(Seq::<i64>::empty().count().unwrap(), 0);
        let text = Seq::cons('x', Seq::from_text("añb").unwrap());
        assert_eq!(text.count().unwrap(), 4);
    }

    #[test]
    fn test_nth() {
        let seq = chunked((0..10).collect(), 3);
        assert_eq!(seq.nth(0).unwrap(), 0);
        assert_eq!(seq.nth(7).unwrap(), 7);
        assert_eq!(seq.nth(10), Err(Error::index(10)));
        assert_eq!(seq.nth(-1), Err(Error::index(-1)));
        assert_eq!(seq.nth_or(10, -5).unwrap(), -5);
        assert_eq!(seq.find(9).unwrap(), Some(9));
        assert_eq!(seq.find(12).unwrap(), None);
        assert_eq!(Seq::from_text("héllo").unwrap().nth(1).unwrap(), 'é');
    }

    #[test]
    fn test_nth_or_propagates_other_errors() {
        let seq = Seq::cons_with(1, || Err(Error::eval("broken")));
        assert_eq!(seq.nth_or(3, 0), Err(Error::eval("broken")));
    }

    #[test]
    fn test_reduce() {
        let seq = chunked((1..=5).collect(), 2);
        assert_eq!(seq.reduce(0, |acc, x| acc + x).unwrap(), 15);
        assert_eq!(seq.reduce1(|acc, x| acc * x).unwrap(), Some(120));
        assert_eq!(Seq::<i64>::empty().reduce1(|a, x| a + x).unwrap(), None);
    }

    #[test]
    fn test_some_stops_at_first_match() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let nats = Seq::iterate(0i64, move |x| {
            counter.set(counter.get() + 1);
            x + 1
        });
        assert!(nats.some(|x| *x == 0).unwrap());
        assert_eq!(calls.get(), 0);
        assert!(nats.some(|x| *x > 5).unwrap());
        assert_eq!(calls.get(), 6);
    }

    #[test]
    fn test_every_and_not_any() {
        let seq = chunked(vec![2, 4, 6], 2);
        assert!(seq.every(|x| x % 2 == 0).unwrap());
        assert!(!seq.every(|x| *x < 5).unwrap());
        assert!(seq.not_any(|x| *x > 6).unwrap());
        assert!(Seq::<i64>::empty().every(|_| false).unwrap());
        // Short-circuits on infinite input when the answer is known
        assert!(!Seq::range_from(0i64).every(|x| *x < 3).unwrap());
    }

    #[test]
    fn test_extrema_ties() {
        let seq = Seq::from_vec(vec![(1, 'a'), (3, 'b'), (3, 'c'), (1, 'd')]);
        assert_eq!(seq.max_key(|p| p.0).unwrap(), Some((3, 'c')));
        assert_eq!(seq.min_key(|p| p.0).unwrap(), Some((1, 'a')));
        assert_eq!(chunked(vec![4, 9, 2], 2).max().unwrap(), Some(9));
        assert_eq!(chunked(vec![4, 9, 2], 2).min().unwrap(), Some(2));
        assert_eq!(Seq::<i64>::empty().max().unwrap(), None);
    }

    #[test]
    fn test_find_first() {
        let seq = Seq::range_from(1i64);
        assert_eq!(seq.find_first().unwrap(), Some(1));
        assert_eq!(seq.find_first_by(|x| x % 7 == 0).unwrap(), Some(7));
        assert_eq!(Seq::<i64>::empty().find_first().unwrap(), None);
        assert_eq!(chunked(vec![1, 3], 2).find_first_by(|x| x % 2 == 0).unwrap(), None);
    }

    #[test]
    fn test_run() {
        let mut seen = Vec::new();
        chunked(vec![1, 2, 3], 2).run(|x| seen.push(*x)).unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
