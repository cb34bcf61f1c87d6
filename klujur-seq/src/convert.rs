// klujur-seq - Materialization
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Materializing a finite sequence into a collection.

use std::hash::Hash;

use crate::error::{Error, Result};
use crate::seq::Seq;

/// An element that can be read as a key/value pair for [`Seq::to_map`].
pub trait MapEntry {
    type Key: Hash + Eq + Clone;
    type Value: Clone;

    /// Split into key and value, failing if the element is not a pair.
    fn into_entry(self) -> Result<(Self::Key, Self::Value)>;
}

impl<K: Hash + Eq + Clone, V: Clone> MapEntry for (K, V) {
    type Key = K;
    type Value = V;

    fn into_entry(self) -> Result<(K, V)> {
        Ok(self)
    }
}

impl<T: Hash + Eq + Clone> MapEntry for [T; 2] {
    type Key = T;
    type Value = T;

    fn into_entry(self) -> Result<(T, T)> {
        let [k, v] = self;
        Ok((k, v))
    }
}

fn not_a_pair(len: usize) -> Error {
    tracing::warn!(len, "map entry is not a pair");
    Error::unsupported(format!("map entry must have 2 elements, got {}", len))
}

impl<T: Hash + Eq + Clone> MapEntry for Vec<T> {
    type Key = T;
    type Value = T;

    fn into_entry(self) -> Result<(T, T)> {
        let len = self.len();
        let mut items = self.into_iter();
        match (items.next(), items.next(), items.next()) {
            (Some(k), Some(v), None) => Ok((k, v)),
            _ => Err(not_a_pair(len)),
        }
    }
}

impl<T: Hash + Eq + Clone> MapEntry for im::Vector<T> {
    type Key = T;
    type Value = T;

    fn into_entry(self) -> Result<(T, T)> {
        match (self.len(), self.front(), self.back()) {
            (2, Some(k), Some(v)) => Ok((k.clone(), v.clone())),
            (len, _, _) => Err(not_a_pair(len)),
        }
    }
}

impl<T: Clone + 'static> Seq<T> {
    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.iter().collect()
    }

    /// Materialize into a persistent vector.
    pub fn to_vector(&self) -> Result<im::Vector<T>> {
        self.iter().collect()
    }

    /// Materialize into a persistent set.
    pub fn to_set(&self) -> Result<im::HashSet<T>>
    where
        T: Hash + Eq,
    {
        self.iter().collect()
    }

    /// Materialize pair-shaped elements into a persistent map. Later keys
    /// replace earlier ones.
    ///
    /// Fails with `UnsupportedOperation` on the first element that is not a
    /// pair.
    pub fn to_map(&self) -> Result<im::HashMap<T::Key, T::Value>>
    where
        T: MapEntry,
    {
        self.iter().map(|item| item?.into_entry()).collect()
    }

    /// Materialize into a persistent map keyed by `key`.
    pub fn to_map_with<K, V, KF, VF>(&self, key: KF, value: VF) -> Result<im::HashMap<K, V>>
    where
        K: Hash + Eq + Clone,
        V: Clone,
        KF: Fn(&T) -> K,
        VF: Fn(&T) -> V,
    {
        self.iter()
            .map(|item| item.map(|x| (key(&x), value(&x))))
            .collect()
    }
}
