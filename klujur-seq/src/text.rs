// klujur-seq - Text-backed sequences
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Sequences read in place from a shared text.
//!
//! A [`TextView`] is the chunked strategy specialised for text: the "chunk"
//! is the remaining slice of the backing string, so no element buffer is
//! ever built. `rest`, `take`, `drop`, `take_while` and `drop_while` only
//! move byte offsets over the same `Rc<str>`.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::chunk::Chunk;
use crate::error::{Error, Result};
use crate::seq::{Node, Seq};

/// The non-empty byte range `[start, end)` of a shared text.
///
/// Stepping to the rest, and `take`/`drop` from a known offset, are byte
/// arithmetic. Character positions are not: `len`, `nth` and construction
/// at a char index walk the UTF-8 text, O(k) in the characters passed.
pub struct TextView<T> {
    text: Rc<str>,
    start: usize,
    end: usize,
    decode: fn(char) -> T,
}

impl<T> Clone for TextView<T> {
    fn clone(&self) -> Self {
        TextView {
            text: self.text.clone(),
            start: self.start,
            end: self.end,
            decode: self.decode,
        }
    }
}

impl Seq<char> {
    /// A sequence over the characters of `text`.
    ///
    /// Fails with `InvalidArgument` if `text` is empty.
    pub fn from_text(text: impl Into<Rc<str>>) -> Result<Seq<char>> {
        Seq::from_text_with(text, 0, std::convert::identity)
    }

    /// A sequence over the characters of `text`, starting at char `index`.
    pub fn from_text_at(text: impl Into<Rc<str>>, index: usize) -> Result<Seq<char>> {
        Seq::from_text_with(text, index, std::convert::identity)
    }
}

impl<T> Seq<T> {
    /// A sequence over the characters of `text` from char `index`, each
    /// character read through `decode`.
    pub fn from_text_with(
        text: impl Into<Rc<str>>,
        index: usize,
        decode: fn(char) -> T,
    ) -> Result<Seq<T>> {
        let text = text.into();
        if text.is_empty() {
            return Err(Error::invalid("text is empty"));
        }
        let Some((start, _)) = text.char_indices().nth(index) else {
            return Err(Error::invalid(format!(
                "index {} is out of range for text of {} chars",
                index,
                text.chars().count()
            )));
        };
        tracing::debug!(bytes = text.len() - start, "text view created");
        let end = text.len();
        Ok(Seq::from_node(Node::Text(TextView {
            text,
            start,
            end,
            decode,
        })))
    }
}

impl<T> TextView<T> {
    /// The remaining text.
    pub fn as_str(&self) -> &str {
        &self.text[self.start..self.end]
    }

    /// Number of characters remaining.
    pub fn len(&self) -> usize {
        self.as_str().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check whether two views read the same backing text.
    pub fn shares_text(&self, other: &TextView<T>) -> bool {
        Rc::ptr_eq(&self.text, &other.text)
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.as_str().chars().map(self.decode)
    }

    pub fn first(&self) -> Option<T> {
        self.as_str().chars().next().map(self.decode)
    }

    pub fn nth(&self, index: usize) -> Option<T> {
        self.as_str().chars().nth(index).map(self.decode)
    }

    /// The element at byte `offset` into the view and its encoded width.
    pub(crate) fn char_at(&self, offset: usize) -> Option<(T, usize)> {
        let c = self.as_str().get(offset..)?.chars().next()?;
        Some(((self.decode)(c), c.len_utf8()))
    }

    pub(crate) fn to_chunk(&self) -> Chunk<T> {
        Chunk::new(self.iter().collect())
    }

    /// A view over `[start, end)` of the same text, or Empty.
    fn narrowed(&self, start: usize, end: usize) -> Node<T> {
        if start >= end {
            return Node::Empty;
        }
        Node::Text(TextView {
            text: self.text.clone(),
            start,
            end,
            decode: self.decode,
        })
    }

    /// Byte offset of the char `n` positions in, or the end of the view.
    fn offset_of(&self, n: usize) -> usize {
        self.as_str()
            .char_indices()
            .nth(n)
            .map_or(self.end, |(i, _)| self.start + i)
    }

    /// Byte offset of the first char failing `pred`, or the end of the view.
    fn offset_while(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.as_str()
            .char_indices()
            .find(|&(_, c)| !pred(&(self.decode)(c)))
            .map_or(self.end, |(i, _)| self.start + i)
    }

    pub(crate) fn rest(&self) -> Seq<T> {
        let width = self.as_str().chars().next().map_or(0, char::len_utf8);
        Seq::from_node(self.narrowed(self.start + width, self.end))
    }

    pub(crate) fn take(&self, n: usize) -> Node<T> {
        self.narrowed(self.start, self.offset_of(n))
    }

    pub(crate) fn drop(&self, n: usize) -> Node<T> {
        self.narrowed(self.offset_of(n), self.end)
    }

    pub(crate) fn take_while(&self, pred: impl Fn(&T) -> bool) -> Node<T> {
        self.narrowed(self.start, self.offset_while(pred))
    }

    pub(crate) fn drop_while(&self, pred: impl Fn(&T) -> bool) -> Node<T> {
        self.narrowed(self.offset_while(pred), self.end)
    }

    /// A new view over a reversed copy of the remaining text.
    pub(crate) fn reverse(&self) -> Seq<T> {
        let reversed: String = self.as_str().chars().rev().collect();
        tracing::debug!(bytes = reversed.len(), "text view reversed");
        let end = reversed.len();
        Seq::from_node(Node::Text(TextView {
            text: Rc::from(reversed),
            start: 0,
            end,
            decode: self.decode,
        }))
    }

    /// First occurrences not already in `seen`, as a new compact view.
    pub(crate) fn distinct(&self, seen: &im::HashSet<T>) -> Node<T>
    where
        T: Hash + Eq + Clone,
    {
        let mut kept = String::new();
        let mut local: HashSet<T> = HashSet::new();
        for c in self.as_str().chars() {
            let elem = (self.decode)(c);
            if !seen.contains(&elem) && local.insert(elem) {
                kept.push(c);
            }
        }
        if kept.is_empty() {
            return Node::Empty;
        }
        let end = kept.len();
        Node::Text(TextView {
            text: Rc::from(kept),
            start: 0,
            end,
            decode: self.decode,
        })
    }
}

impl<T> fmt::Debug for TextView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<TextView {:?}>", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(seq: &Seq<char>) -> TextView<char> {
        match seq.node().unwrap() {
            Node::Text(view) => view.clone(),
            other => panic!("expected text node, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_empty_text() {
        assert!(matches!(
            Seq::from_text(""),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        assert!(matches!(
            Seq::from_text_at("abc", 3),
            Err(Error::InvalidArgument(_))
        ));
        let seq = Seq::from_text_at("abc", 2).unwrap();
        assert_eq!(seq.first().unwrap(), 'c');
    }

    #[test]
    fn test_rest_shares_text() {
        let seq = Seq::from_text("héllo").unwrap();
        let rest = seq.rest().unwrap();
        assert_eq!(rest.first().unwrap(), 'é');
        assert!(view(&rest).shares_text(&view(&seq)));
        assert_eq!(view(&rest.rest().unwrap()).as_str(), "llo");
    }

    #[test]
    fn test_rest_of_last_char_is_empty() {
        let seq = Seq::from_text("z").unwrap();
        assert!(seq.rest().unwrap().is_empty().unwrap());
    }

    #[test]
    fn test_take_and_drop_narrow_in_place() {
        let seq = Seq::from_text("abcdef").unwrap();
        let v = view(&seq);
        match v.take(2) {
            Node::Text(t) => assert_eq!(t.as_str(), "ab"),
            other => panic!("unexpected {:?}", other),
        }
        match v.drop(4) {
            Node::Text(t) => {
                assert_eq!(t.as_str(), "ef");
                assert!(t.shares_text(&v));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(v.drop(6).is_empty());
        assert!(v.take(0).is_empty());
    }

    #[test]
    fn test_while_offsets() {
        let v = view(&Seq::from_text("aab").unwrap());
        match v.take_while(|c| *c == 'a') {
            Node::Text(t) => assert_eq!(t.as_str(), "aa"),
            other => panic!("unexpected {:?}", other),
        }
        match v.drop_while(|c| *c == 'a') {
            Node::Text(t) => assert_eq!(t.as_str(), "b"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(v.drop_while(|_| true).is_empty());
    }

    #[test]
    fn test_distinct_compacts() {
        let v = view(&Seq::from_text("acabbd").unwrap());
        match v.distinct(&im::HashSet::new()) {
            Node::Text(t) => assert_eq!(t.as_str(), "acbd"),
            other => panic!("unexpected {:?}", other),
        }
        let seen: im::HashSet<char> = ['a', 'b'].into_iter().collect();
        match v.distinct(&seen) {
            Node::Text(t) => assert_eq!(t.as_str(), "cd"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_decode() {
        let seq = Seq::from_text_with("AB", 0, |c| c as u32).unwrap();
        assert_eq!(seq.first().unwrap(), 65);
        assert_eq!(seq.rest().unwrap().first().unwrap(), 66);
    }
}
