use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{TypeError, TypeResult};

/// A named root mapping.
///
/// Documents are what stores hand to the factoring algorithm and what it
/// hands back: the master document and one delta per input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store-level name, e.g. the file stem `conf1`.
    pub name: String,
    /// The root mapping.
    pub root: Map<String, Value>,
}

impl Document {
    /// Create a document from a name and a root mapping.
    pub fn new(name: impl Into<String>, root: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Create a document from an arbitrary value, which must be a mapping.
    pub fn from_value(name: impl Into<String>, value: Value) -> TypeResult<Self> {
        match value {
            Value::Object(root) => Ok(Self::new(name, root)),
            other => Err(TypeError::TypeMismatch {
                expected: "mapping",
                actual: value_kind(&other),
            }),
        }
    }

    /// The root as a plain value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }
}

/// Short name of a value's variant, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
