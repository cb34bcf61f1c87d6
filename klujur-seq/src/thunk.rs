// klujur-seq - Suspension cells
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Memoized zero-argument computations.
//!
//! A [`Thunk`] defers a computation until it is first forced and caches the
//! result. Results are cached after the first successful evaluation; a body
//! that fails is kept, and the next `force` runs it again.

use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};

/// The deferred computation of a thunk.
type Body<V> = Rc<dyn Fn() -> Result<V>>;

/// A write-once cell filled by a deferred computation.
pub struct Thunk<V> {
    value: OnceCell<V>,
    body: RefCell<Option<Body<V>>>,
}

impl<V> Thunk<V> {
    /// Create a pending thunk.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn() -> Result<V> + 'static,
    {
        Thunk {
            value: OnceCell::new(),
            body: RefCell::new(Some(Rc::new(body))),
        }
    }

    /// Create a thunk that is already realized.
    pub fn realized(value: V) -> Self {
        Thunk {
            value: OnceCell::from(value),
            body: RefCell::new(None),
        }
    }

    /// Check if the thunk has been realized.
    pub fn is_realized(&self) -> bool {
        self.value.get().is_some()
    }

    /// Get the cached value without forcing.
    pub fn get(&self) -> Option<&V> {
        self.value.get()
    }

    /// Force the thunk, evaluating the body if it has not succeeded yet.
    pub fn force(&self) -> Result<&V> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        // Clone the body out so the borrow is released while it runs
        let body = self.body.borrow().clone();
        let Some(body) = body else {
            return Err(Error::Internal(
                "suspension has neither a value nor a body".to_string(),
            ));
        };

        tracing::trace!("forcing suspension");
        match body() {
            Ok(result) => {
                // A reentrant force may have filled the cell; the first value wins
                let value = self.value.get_or_init(|| result);
                // Release the body so captured sources can be reclaimed
                self.body.borrow_mut().take();
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(error = %err, "suspension failed, body kept for retry");
                Err(err)
            }
        }
    }

    /// Take the value out of a uniquely owned thunk.
    pub(crate) fn take(&mut self) -> Option<V> {
        self.body.get_mut().take();
        self.value.take()
    }
}

impl<V: fmt::Debug> fmt::Debug for Thunk<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => write!(f, "#<Thunk: {:?}>", value),
            None => write!(f, "#<Thunk: pending>"),
        }
    }
}
