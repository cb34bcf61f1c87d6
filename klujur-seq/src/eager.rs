// klujur-seq - Eager reordering
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Operations that must see the whole (finite) sequence before producing
//! anything: sorting and reversal.

use std::cmp::Ordering;

use crate::error::Result;
use crate::seq::{Node, Seq};

impl<T: Clone + 'static> Seq<T> {
    /// The elements in ascending order. The sort is stable.
    pub fn sorted(&self) -> Result<Seq<T>>
    where
        T: Ord,
    {
        self.sorted_by(T::cmp)
    }

    /// The elements ordered by `cmp`. The sort is stable.
    pub fn sorted_by<F>(&self, cmp: F) -> Result<Seq<T>>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut items = self.to_vec()?;
        tracing::debug!(len = items.len(), "sorting sequence");
        items.sort_by(cmp);
        Ok(Seq::from_vec(items))
    }

    /// The elements in reverse order.
    ///
    /// A sequence that is a text view reverses into a new text view.
    pub fn reverse(&self) -> Result<Seq<T>> {
        if let Node::Text(view) = self.node()? {
            return Ok(view.reverse());
        }
        let mut items = self.to_vec()?;
        tracing::debug!(len = items.len(), "reversing sequence");
        items.reverse();
        Ok(Seq::from_vec(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted() {
        let seq = Seq::from_vec(vec![3, 1, 2]).sorted().unwrap();
        assert_eq!(seq.to_vec().unwrap(), vec![1, 2, 3]);
        let seq = Seq::from_vec(vec![3, 1, 2])
            .sorted_by(|a, b| b.cmp(a))
            .unwrap();
        assert_eq!(seq.to_vec().unwrap(), vec![3, 2, 1]);
    }

    #[test]
    fn test_sorted_by_is_stable() {
        let seq = Seq::from_vec(vec![(1, 'b'), (0, 'x'), (1, 'a')])
            .sorted_by(|a, b| a.0.cmp(&b.0))
            .unwrap();
        assert_eq!(seq.to_vec().unwrap(), vec![(0, 'x'), (1, 'b'), (1, 'a')]);
    }

    #[test]
    fn test_reverse() {
        let seq = Seq::cons(1, Seq::from_vec(vec![2, 3])).reverse().unwrap();
        assert_eq!(seq.to_vec().unwrap(), vec![3, 2, 1]);
        assert!(Seq::<i32>::empty().reverse().unwrap().is_empty().unwrap());
    }

    #[test]
    fn test_reverse_text_stays_text() {
        let seq = Seq::from_text("abç").unwrap().reverse().unwrap();
        match seq.node().unwrap() {
            Node::Text(view) => assert_eq!(view.as_str(), "çba"),
            other => panic!("expected text node, got {:?}", other),
        }
    }
}
