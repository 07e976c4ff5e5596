//! Depth-first leaf iteration.
//!
//! Walks a tree in pre-order and yields every leaf together with its path:
//!
//! - scalars and `null` are leaves;
//! - an empty mapping or empty sequence below the root is a leaf, so keys
//!   holding `{}` or `[]` are not dropped;
//! - mapping children are visited in insertion order;
//! - sequence elements are visited in index order when lists are converted,
//!   `null` elements are skipped and later elements keep their original
//!   index;
//! - with list conversion off, a whole sequence is one leaf.
//!
//! The root itself is never a leaf, even when empty.

use serde_json::{Map, Value};
use vocab_types::{Path, Segment};

/// Lazy iterator over `(Path, &Value)` leaf pairs.
///
/// A clone continues from the same position. Call
/// [`crate::Splitter::leaves`] again to restart from the root.
#[derive(Clone, Debug)]
pub struct Leaves<'a> {
    stack: Vec<(Path, &'a Value)>,
    convert_lists: bool,
}

impl<'a> Leaves<'a> {
    /// Walk the leaves below a root mapping.
    pub fn new(root: &'a Map<String, Value>, convert_lists: bool) -> Self {
        let mut leaves = Self {
            stack: Vec::new(),
            convert_lists,
        };
        leaves.push_mapping(&Path::root(), root);
        leaves
    }

    /// Walk the leaves below an arbitrary value treated as the root.
    pub fn from_value(root: &'a Value, convert_lists: bool) -> Self {
        Self {
            stack: vec![(Path::root(), root)],
            convert_lists,
        }
    }

    fn push_mapping(&mut self, path: &Path, map: &'a Map<String, Value>) {
        // Reverse so the first key is popped first.
        for (key, child) in map.iter().rev() {
            self.stack
                .push((path.child(Segment::Key(key.clone())), child));
        }
    }

    fn push_sequence(&mut self, path: &Path, items: &'a [Value]) {
        for (index, item) in items.iter().enumerate().rev() {
            if !item.is_null() {
                self.stack.push((path.child(Segment::Index(index)), item));
            }
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (Path, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, value)) = self.stack.pop() {
            match value {
                Value::Object(map) if !map.is_empty() => self.push_mapping(&path, map),
                Value::Array(items) if self.convert_lists && !items.is_empty() => {
                    self.push_sequence(&path, items)
                }
                _ if path.is_empty() => {}
                _ => return Some((path, value)),
            }
        }
        None
    }
}
