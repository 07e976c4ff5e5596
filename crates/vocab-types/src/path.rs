//! Structured paths into a nested mapping/sequence tree.
//!
//! A [`Path`] is an ordered list of [`Segment`]s starting at the root
//! mapping. Segment order mirrors container nesting: a [`Segment::Key`]
//! always steps into a mapping and a [`Segment::Index`] always steps into a
//! sequence. The empty path addresses the root itself and never names a leaf.

use std::fmt;

/// One step from a container to one of its children.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// A key inside a mapping.
    Key(String),
    /// A position inside a sequence.
    Index(usize),
}

impl Segment {
    /// Create a mapping key segment.
    pub fn key(name: impl Into<String>) -> Self {
        Self::Key(name.into())
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Self::Key(name.to_string())
    }
}

impl From<String> for Segment {
    fn from(name: String) -> Self {
        Self::Key(name)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A root-relative address of a leaf.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path (the root).
    pub fn root() -> Self {
        Self::default()
    }

    /// Create a path from its segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    /// Append a segment in place.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// The segments of this path, root first.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the segments, root first.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}

impl From<&[Segment]> for Path {
    fn from(segments: &[Segment]) -> Self {
        Self::new(segments.to_vec())
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Debug-style rendering that does not depend on a codec: `("a", 0, "b")`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match segment {
                Segment::Key(name) => write!(f, "{name:?}")?,
                Segment::Index(index) => write!(f, "{index}")?,
            }
        }
        write!(f, ")")
    }
}

/// Build a [`Path`] from a list of segment-convertible values.
///
/// ```
/// use vocab_types::{path, Path, Segment};
///
/// let p: Path = path!["handlers", 0usize, "urlRegex"];
/// assert_eq!(p.segments()[1], Segment::Index(0));
/// ```
#[macro_export]
macro_rules! path {
    () => { $crate::Path::root() };
    ($($segment:expr),+ $(,)?) => {
        $crate::Path::new(vec![$($crate::Segment::from($segment)),+])
    };
}
