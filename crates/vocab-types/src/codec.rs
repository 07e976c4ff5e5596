//! String form of paths.
//!
//! Segments are joined by a key delimiter (default `.`). A segment that
//! starts with the list marker (default `*`) is a sequence index, e.g.
//! `"handlers.*0.urlRegex"`.
//!
//! Round-tripping `parse(format(p)) == p` holds for every path whose
//! mapping keys neither contain the delimiter nor start with the marker.

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::path::{Path, Segment};

/// Default separator between path segments.
pub const DEFAULT_KEY_DELIMITER: &str = ".";

/// Default prefix marking a segment as a sequence index.
pub const DEFAULT_LIST_MARKER: &str = "*";

/// Converts between delimiter-joined strings and structured [`Path`]s.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathCodec {
    /// Separator between segments.
    pub key_delimiter: String,
    /// Prefix identifying a sequence index segment.
    pub list_marker: String,
}

impl Default for PathCodec {
    fn default() -> Self {
        Self {
            key_delimiter: DEFAULT_KEY_DELIMITER.into(),
            list_marker: DEFAULT_LIST_MARKER.into(),
        }
    }
}

impl PathCodec {
    /// Create a codec with custom delimiters.
    ///
    /// Both delimiters must be non-empty.
    pub fn new(
        key_delimiter: impl Into<String>,
        list_marker: impl Into<String>,
    ) -> TypeResult<Self> {
        let codec = Self {
            key_delimiter: key_delimiter.into(),
            list_marker: list_marker.into(),
        };
        codec.validate()?;
        Ok(codec)
    }

    /// Check that both delimiters are usable.
    ///
    /// Codecs built through `Deserialize` or struct literals bypass
    /// [`PathCodec::new`], so callers loading configuration should call this.
    pub fn validate(&self) -> TypeResult<()> {
        if self.key_delimiter.is_empty() {
            return Err(TypeError::EmptyDelimiter("key delimiter"));
        }
        if self.list_marker.is_empty() {
            return Err(TypeError::EmptyDelimiter("list marker"));
        }
        // Index segments would be split apart on parse.
        if self.list_marker.contains(self.key_delimiter.as_str()) {
            return Err(TypeError::DelimiterClash {
                key_delimiter: self.key_delimiter.clone(),
                list_marker: self.list_marker.clone(),
            });
        }
        Ok(())
    }

    /// Parse a string path into segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use vocab_types::{PathCodec, Segment};
    ///
    /// let codec = PathCodec::default();
    /// let path = codec.parse("a.b.*2.c").unwrap();
    /// assert_eq!(path.segments()[2], Segment::Index(2));
    /// assert!(codec.parse("a.*x").is_err());
    /// ```
    pub fn parse(&self, input: &str) -> TypeResult<Path> {
        input
            .split(self.key_delimiter.as_str())
            .map(|piece| self.parse_segment(input, piece))
            .collect()
    }

    fn parse_segment(&self, input: &str, piece: &str) -> TypeResult<Segment> {
        match piece.strip_prefix(self.list_marker.as_str()) {
            Some(digits) => digits
                .parse::<usize>()
                .map(Segment::Index)
                .map_err(|_| TypeError::MalformedPath {
                    path: input.to_string(),
                    segment: piece.to_string(),
                }),
            None => Ok(Segment::Key(piece.to_string())),
        }
    }

    /// Render a path as a delimiter-joined string.
    pub fn format(&self, path: &Path) -> String {
        let mut out = String::new();
        for (i, segment) in path.iter().enumerate() {
            if i > 0 {
                out.push_str(&self.key_delimiter);
            }
            out.push_str(&self.format_segment(segment));
        }
        out
    }

    /// Render a single segment (`name` or `<marker><index>`).
    pub fn format_segment(&self, segment: &Segment) -> String {
        match segment {
            Segment::Key(name) => name.clone(),
            Segment::Index(index) => format!("{}{index}", self.list_marker),
        }
    }
}

/// Anything that can address a leaf: a string path or a structured one.
///
/// Structured paths are returned unchanged; strings go through the codec.
pub trait PathLike {
    /// Resolve into a structured [`Path`].
    fn to_path(&self, codec: &PathCodec) -> TypeResult<Path>;
}

impl PathLike for str {
    fn to_path(&self, codec: &PathCodec) -> TypeResult<Path> {
        codec.parse(self)
    }
}

impl PathLike for String {
    fn to_path(&self, codec: &PathCodec) -> TypeResult<Path> {
        codec.parse(self)
    }
}

impl PathLike for Path {
    fn to_path(&self, _codec: &PathCodec) -> TypeResult<Path> {
        Ok(self.clone())
    }
}

impl PathLike for [Segment] {
    fn to_path(&self, _codec: &PathCodec) -> TypeResult<Path> {
        Ok(Path::from(self))
    }
}

impl PathLike for Vec<Segment> {
    fn to_path(&self, _codec: &PathCodec) -> TypeResult<Path> {
        Ok(Path::from(self.as_slice()))
    }
}

impl<T: PathLike + ?Sized> PathLike for &T {
    fn to_path(&self, codec: &PathCodec) -> TypeResult<Path> {
        (**self).to_path(codec)
    }
}
