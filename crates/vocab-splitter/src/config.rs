use serde::{Deserialize, Serialize};
use vocab_types::{PathCodec, TypeResult};

/// Configuration shared by a splitter and everything derived from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Delimiters used for string paths.
    #[serde(flatten)]
    pub codec: PathCodec,
    /// When `true`, sequences are walked element by element. When `false`,
    /// a whole sequence is one opaque leaf.
    pub convert_lists: bool,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            codec: PathCodec::default(),
            convert_lists: true,
        }
    }
}

impl SplitterConfig {
    /// Replace both delimiters. Fails if either is empty.
    pub fn with_delimiters(
        mut self,
        key_delimiter: impl Into<String>,
        list_marker: impl Into<String>,
    ) -> TypeResult<Self> {
        self.codec = PathCodec::new(key_delimiter, list_marker)?;
        Ok(self)
    }

    /// Toggle list conversion.
    pub fn with_convert_lists(mut self, convert_lists: bool) -> Self {
        self.convert_lists = convert_lists;
        self
    }

    /// Treat sequences as opaque leaves.
    pub fn opaque_lists() -> Self {
        Self::default().with_convert_lists(false)
    }

    /// Check the codec delimiters.
    pub fn validate(&self) -> TypeResult<()> {
        self.codec.validate()
    }
}
