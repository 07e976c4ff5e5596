//! Structural set operations over flattened leaves.
//!
//! The operations compare `(Path, leaf)` pairs and never look at the
//! original shapes. Operands are only read; each result is a fresh
//! [`Splitter`] carrying the left operand's configuration.

use std::collections::HashMap;
use std::ops::{Add, BitXor, Sub};

use serde_json::Value;
use vocab_types::Path;

use crate::splitter::Splitter;

fn index(splitter: &Splitter) -> HashMap<Path, &Value> {
    splitter.leaves().collect()
}

/// Leaves of `b` that `a` holds at the same path with an equal value.
///
/// The result follows `b`'s traversal order.
pub fn shared_subset(a: &Splitter, b: &Splitter) -> Splitter {
    let lookup = index(a);
    let mut out = Splitter::empty(a.config().clone());
    for (path, value) in b.leaves() {
        if lookup.get(&path) == Some(&value) {
            out.put(&path, value.clone());
        }
    }
    out
}

/// Leaves of `a` that `b` does not hold at the same path with an equal value.
pub fn difference(a: &Splitter, b: &Splitter) -> Splitter {
    let lookup = index(b);
    let mut out = Splitter::empty(a.config().clone());
    for (path, value) in a.leaves() {
        if lookup.get(&path) != Some(&value) {
            out.put(&path, value.clone());
        }
    }
    out
}

/// A deep copy of `a` with every non-null leaf of `b` written over it.
///
/// `null` leaves in `b` are skipped, so a merge can add or overwrite
/// leaves but never remove them.
pub fn merge(a: &Splitter, b: &Splitter) -> Splitter {
    let mut out = a.clone();
    for (path, value) in b.leaves() {
        if !value.is_null() {
            out.put(&path, value.clone());
        }
    }
    out
}

impl Splitter {
    /// See [`shared_subset`].
    pub fn shared_subset(&self, other: &Splitter) -> Splitter {
        shared_subset(self, other)
    }

    /// See [`difference`].
    pub fn difference(&self, other: &Splitter) -> Splitter {
        difference(self, other)
    }

    /// See [`merge`].
    pub fn merge(&self, other: &Splitter) -> Splitter {
        merge(self, other)
    }
}

impl BitXor for &Splitter {
    type Output = Splitter;

    fn bitxor(self, rhs: &Splitter) -> Splitter {
        shared_subset(self, rhs)
    }
}

impl Sub for &Splitter {
    type Output = Splitter;

    fn sub(self, rhs: &Splitter) -> Splitter {
        difference(self, rhs)
    }
}

impl Add for &Splitter {
    type Output = Splitter;

    fn add(self, rhs: &Splitter) -> Splitter {
        merge(self, rhs)
    }
}
