//! Path-addressed access to an owned root mapping.
//!
//! Reads scan the flattened leaves, so `get` and `delete` are O(size) in
//! the tree. Writes walk the path directly and create missing containers
//! on the way down.
//!
//! Sequence writes never pad: an index past the end of a sequence appends
//! the value as the new last element, whatever the index was.

use std::fmt;

use serde_json::{Map, Value};
use tracing::debug;
use vocab_types::{value_kind, Path, PathLike, Segment, TypeError};

use crate::config::SplitterConfig;
use crate::error::{SplitError, SplitResult};
use crate::leaves::Leaves;

/// A flattening view that owns and mutates one root mapping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Splitter {
    root: Map<String, Value>,
    config: SplitterConfig,
}

impl Splitter {
    /// Wrap a root mapping with the default configuration.
    pub fn new(root: Map<String, Value>) -> Self {
        Self::with_config(root, SplitterConfig::default())
    }

    /// Wrap a root mapping with a custom configuration.
    pub fn with_config(root: Map<String, Value>, config: SplitterConfig) -> Self {
        Self { root, config }
    }

    /// An empty root with the given configuration.
    pub fn empty(config: SplitterConfig) -> Self {
        Self::with_config(Map::new(), config)
    }

    /// Wrap an arbitrary value, which must be a mapping.
    pub fn from_value(value: Value) -> SplitResult<Self> {
        Self::from_value_with_config(value, SplitterConfig::default())
    }

    /// Wrap an arbitrary value with a custom configuration.
    pub fn from_value_with_config(value: Value, config: SplitterConfig) -> SplitResult<Self> {
        match value {
            Value::Object(root) => Ok(Self::with_config(root, config)),
            other => Err(SplitError::Type(TypeError::TypeMismatch {
                expected: "mapping",
                actual: value_kind(&other),
            })),
        }
    }

    /// The configuration this splitter was built with.
    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// The underlying root mapping.
    pub fn underlying(&self) -> &Map<String, Value> {
        &self.root
    }

    /// A deep copy of the underlying root as a plain value.
    pub fn as_tree(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// Consume the splitter and return its root mapping.
    pub fn into_inner(self) -> Map<String, Value> {
        self.root
    }

    // ---- Flattened view ----

    /// Iterate over every `(Path, leaf)` pair in depth-first order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(&self.root, self.config.convert_lists)
    }

    /// Alias of [`Splitter::leaves`].
    pub fn items(&self) -> Leaves<'_> {
        self.leaves()
    }

    /// All leaf paths, in traversal order.
    pub fn keys(&self) -> Vec<Path> {
        self.leaves().map(|(path, _)| path).collect()
    }

    /// All leaf values, in traversal order.
    pub fn values(&self) -> Vec<&Value> {
        self.leaves().map(|(_, value)| value).collect()
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.leaves().count()
    }

    /// Returns `true` if the tree has no leaves.
    pub fn is_empty(&self) -> bool {
        self.leaves().next().is_none()
    }

    /// Returns `true` if a leaf exists at `path`.
    ///
    /// A string path that fails to parse names no leaf and yields `false`.
    pub fn contains_path(&self, path: impl PathLike) -> bool {
        match path.to_path(&self.config.codec) {
            Ok(target) => self.leaves().any(|(p, _)| p == target),
            Err(_) => false,
        }
    }

    /// Render a path with this splitter's delimiters.
    pub fn format_path(&self, path: &Path) -> String {
        self.config.codec.format(path)
    }

    // ---- Accessors ----

    /// Read the leaf at `path`.
    ///
    /// Only leaves are addressable: a path naming a non-empty container
    /// fails with [`SplitError::KeyNotFound`].
    pub fn get(&self, path: impl PathLike) -> SplitResult<&Value> {
        let target = path.to_path(&self.config.codec)?;
        self.leaves()
            .find(|(p, _)| *p == target)
            .map(|(_, value)| value)
            .ok_or_else(|| SplitError::KeyNotFound(self.format_path(&target)))
    }

    /// Write `value` at `path`, creating intermediate containers.
    ///
    /// A key step creates a mapping and an index step creates a sequence.
    /// An existing value of the wrong shape on the way down is replaced by
    /// an empty container of the right shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use vocab_splitter::Splitter;
    ///
    /// let mut s = Splitter::default();
    /// s.set("one.two.three.*0", json!("a")).unwrap();
    /// s.set("one.two.three.*7", json!("b")).unwrap();
    /// assert_eq!(s.as_tree(), json!({"one": {"two": {"three": ["a", "b"]}}}));
    /// ```
    pub fn set(&mut self, path: impl PathLike, value: Value) -> SplitResult<()> {
        let path = path.to_path(&self.config.codec)?;
        match path.segments().split_first() {
            None => Err(SplitError::EmptyPath),
            Some((Segment::Index(_), _)) => Err(SplitError::TypeMismatch {
                path: self.format_path(&path),
                reason: "a list index cannot address the root mapping",
            }),
            Some((Segment::Key(key), rest)) => {
                write_into_mapping(&mut self.root, key, rest, value);
                Ok(())
            }
        }
    }

    /// Write a leaf whose path came from flattening another splitter.
    ///
    /// Flattened paths always start with a key, so this cannot fail.
    pub(crate) fn put(&mut self, path: &Path, value: Value) {
        if let Some((Segment::Key(key), rest)) = path.segments().split_first() {
            write_into_mapping(&mut self.root, key, rest, value);
        }
    }

    /// Remove the leaf at `path`.
    ///
    /// The tree is rebuilt from every other leaf, which is O(size).
    /// Containers left empty by the removal disappear and later sequence
    /// elements shift down.
    pub fn delete(&mut self, path: impl PathLike) -> SplitResult<()> {
        let target = path.to_path(&self.config.codec)?;
        let mut found = false;
        let kept: Vec<(Path, Value)> = self
            .leaves()
            .filter(|(p, _)| {
                let matched = *p == target;
                found |= matched;
                !matched
            })
            .map(|(p, value)| (p, value.clone()))
            .collect();

        if !found {
            return Err(SplitError::KeyNotFound(self.format_path(&target)));
        }

        let mut rebuilt = Self::empty(self.config.clone());
        for (p, value) in kept {
            rebuilt.put(&p, value);
        }
        self.root = rebuilt.root;
        Ok(())
    }
}

impl From<Map<String, Value>> for Splitter {
    fn from(root: Map<String, Value>) -> Self {
        Self::new(root)
    }
}

impl TryFrom<Value> for Splitter {
    type Error = SplitError;

    fn try_from(value: Value) -> SplitResult<Self> {
        Self::from_value(value)
    }
}

/// Compact JSON of the underlying tree.
impl fmt::Display for Splitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.root).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

fn write_into_mapping(map: &mut Map<String, Value>, key: &str, rest: &[Segment], value: Value) {
    match rest.split_first() {
        None => {
            map.insert(key.to_string(), value);
        }
        Some((Segment::Key(next), tail)) => {
            let child = map
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            write_into_mapping(ensure_mapping(child), next, tail, value);
        }
        Some((Segment::Index(next), tail)) => {
            let child = map
                .entry(key.to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            write_into_sequence(ensure_sequence(child), *next, tail, value);
        }
    }
}

fn write_into_sequence(items: &mut Vec<Value>, position: usize, rest: &[Segment], value: Value) {
    match rest.split_first() {
        None => {
            if position < items.len() {
                items[position] = value;
            } else {
                items.push(value);
            }
        }
        Some((Segment::Key(next), tail)) => {
            let slot = slot_or_append(items, position, || Value::Object(Map::new()));
            write_into_mapping(ensure_mapping(slot), next, tail, value);
        }
        Some((Segment::Index(next), tail)) => {
            let slot = slot_or_append(items, position, || Value::Array(Vec::new()));
            write_into_sequence(ensure_sequence(slot), *next, tail, value);
        }
    }
}

/// The element at `position`, or a fresh element appended at the end.
fn slot_or_append(
    items: &mut Vec<Value>,
    position: usize,
    fresh: impl FnOnce() -> Value,
) -> &mut Value {
    let index = if position < items.len() {
        position
    } else {
        items.push(fresh());
        items.len() - 1
    };
    &mut items[index]
}

fn ensure_mapping(slot: &mut Value) -> &mut Map<String, Value> {
    if !slot.is_object() {
        debug!(replaced = value_kind(slot), "replacing value with empty mapping");
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("slot holds a mapping"),
    }
}

fn ensure_sequence(slot: &mut Value) -> &mut Vec<Value> {
    if !slot.is_array() {
        debug!(replaced = value_kind(slot), "replacing value with empty sequence");
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => items,
        _ => unreachable!("slot holds a sequence"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashSet;
    use vocab_types::path;

    fn splitter(value: Value) -> Splitter {
        Splitter::from_value(value).unwrap()
    }

    fn example_dict() -> Value {
        json!({
            "key": "value",
            "key2": "value2",
            "key3": "value3",
            "int_key": 1,
            "bool_key": true
        })
    }

    fn example_nested_dict() -> Value {
        json!({
            "key": "value",
            "key2": {
                "nested_key1": "nested_value1",
                "nested_key2": 1,
                "another_dict_key": {"hello": "world", "float": 0.2, "bool": false}
            }
        })
    }

    fn example_with_lists() -> Value {
        json!({
            "key": "value",
            "nested_key": {
                "simple_key": "simple_value",
                "list_key": [0, 1, 2, 3, 4, 5, {"ps": "s"}]
            }
        })
    }

    #[test]
    fn construct_keeps_root_and_defaults() {
        let s = splitter(example_dict());
        assert_eq!(Value::Object(s.underlying().clone()), example_dict());
        assert_eq!(s.config().codec.key_delimiter, ".");
        assert_eq!(s.config().codec.list_marker, "*");
    }

    #[test]
    fn construct_rejects_non_mapping() {
        let err = Splitter::from_value(json!(["a"])).unwrap_err();
        assert!(matches!(
            err,
            SplitError::Type(TypeError::TypeMismatch { expected: "mapping", actual: "sequence" })
        ));
        assert!(Splitter::try_from(json!("text")).is_err());
    }

    #[test]
    fn keys_values_and_len() {
        let s = splitter(example_with_lists());
        let keys = s.keys();
        assert!(keys.contains(&path!["key"]));
        assert!(keys.contains(&path!["nested_key", "list_key", 0usize]));
        assert!(keys.contains(&path!["nested_key", "list_key", 6usize, "ps"]));
        assert!(!keys.contains(&path!["nested_key"]));
        assert_eq!(
            s.values(),
            vec![
                &json!("value"),
                &json!("simple_value"),
                &json!(0),
                &json!(1),
                &json!(2),
                &json!(3),
                &json!(4),
                &json!(5),
                &json!("s"),
            ]
        );
        assert_eq!(s.len(), 9);
    }

    #[test]
    fn len_depends_on_list_conversion() {
        let doc = json!({"test": "1", "list": [1, 2, 3]});
        assert_eq!(splitter(doc.clone()).len(), 4);
        let opaque = Splitter::from_value_with_config(doc, SplitterConfig::opaque_lists()).unwrap();
        assert_eq!(opaque.len(), 2);
        assert!(opaque.contains_path("list"));
        assert!(!opaque.contains_path("list.*0"));
    }

    #[test]
    fn get_by_string_and_structured_path() {
        let s = splitter(example_with_lists());
        assert_eq!(s.get("key").unwrap(), &json!("value"));
        assert_eq!(s.get("nested_key.simple_key").unwrap(), &json!("simple_value"));
        assert_eq!(s.get(path!["nested_key", "simple_key"]).unwrap(), &json!("simple_value"));
        assert_eq!(s.get("nested_key.list_key.*2").unwrap(), &json!(2));
        assert_eq!(s.get(&path!["nested_key", "list_key", 2usize]).unwrap(), &json!(2));
    }

    #[test]
    fn get_missing_or_container_fails() {
        let s = splitter(example_with_lists());
        assert_eq!(
            s.get("nested_key").unwrap_err(),
            SplitError::KeyNotFound("nested_key".into())
        );
        assert!(matches!(s.get("keyyyy"), Err(SplitError::KeyNotFound(_))));
        assert!(matches!(s.get("key.*x"), Err(SplitError::Type(_))));
    }

    #[test]
    fn get_returns_null_leaves() {
        let s = splitter(json!({"a": null}));
        assert_eq!(s.get("a").unwrap(), &Value::Null);
    }

    #[test]
    fn custom_delimiters_apply_to_string_paths() {
        let config = SplitterConfig::default().with_delimiters("-", "+").unwrap();
        let s = Splitter::from_value_with_config(json!({"a": {"b": [1, 2]}}), config).unwrap();
        assert_eq!(s.get("a-b-+1").unwrap(), &json!(2));
        assert_eq!(s.format_path(&path!["a", "b", 0usize]), "a-b-+0");
    }

    #[test]
    fn set_single_and_subtree() {
        let mut s = Splitter::default();
        s.set("test", json!("test_value")).unwrap();
        assert!(s.keys().contains(&path!["test"]));

        s.set("test2", json!({"a": "b"})).unwrap();
        assert!(s.keys().contains(&path!["test2", "a"]));
        assert!(s.values().contains(&&json!("b")));

        s.set("some_key", json!({})).unwrap();
        s.set("some_key.abc", json!(256)).unwrap();
        assert_eq!(s.get("some_key.abc").unwrap(), &json!(256));
    }

    #[test]
    fn set_nested_creates_and_overwrites() {
        let mut s = Splitter::default();
        s.set(path!["a", "b", "c"], json!("d")).unwrap();
        assert_eq!(s.get("a.b.c").unwrap(), &json!("d"));

        s.set(path!["a", "b", "c"], json!("e")).unwrap();
        assert!(!s.values().contains(&&json!("d")));

        s.set(path!["a", "b", "x"], json!("y")).unwrap();
        assert_eq!(s.as_tree(), json!({"a": {"b": {"c": "e", "x": "y"}}}));
    }

    #[test]
    fn set_through_scalar_replaces_it() {
        let mut s = splitter(json!({"a": "scalar"}));
        s.set("a.b", json!(1)).unwrap();
        assert_eq!(s.as_tree(), json!({"a": {"b": 1}}));

        s.set("a.b.*0", json!("x")).unwrap();
        assert_eq!(s.as_tree(), json!({"a": {"b": ["x"]}}));
    }

    #[test]
    fn set_keeps_key_position_on_overwrite() {
        let mut s = splitter(json!({"first": 1, "second": 2}));
        s.set("first", json!(10)).unwrap();
        let keys: Vec<&String> = s.underlying().keys().collect();
        assert_eq!(keys, vec!["first", "second"]);
    }

    #[test]
    fn set_list_elements() {
        let mut s = splitter(example_dict());
        s.set("list_key", json!([0])).unwrap();
        assert!(s.keys().contains(&path!["list_key", 0usize]));

        s.set("list_key.*1", json!(1)).unwrap();
        assert_eq!(s.underlying()["list_key"], json!([0, 1]));

        s.set("one.two.three.*0", json!("a")).unwrap();
        s.set("one.two.three.*1", json!("b")).unwrap();
        s.set("one.two.three.*2", json!("c")).unwrap();
        assert_eq!(s.get("one.two.three.*2").unwrap(), &json!("c"));
        assert_eq!(s.underlying()["one"]["two"]["three"], json!(["a", "b", "c"]));
    }

    #[test]
    fn out_of_bounds_index_appends() {
        let mut s = Splitter::default();
        s.set("list_key.*1", json!("v1")).unwrap();
        assert_eq!(s.as_tree(), json!({"list_key": ["v1"]}));

        s.set("list_key.*0", json!("v0")).unwrap();
        assert_eq!(s.as_tree(), json!({"list_key": ["v0"]}));

        s.set("list_key.*1", json!("v1")).unwrap();
        assert_eq!(s.as_tree(), json!({"list_key": ["v0", "v1"]}));

        s.set("list_key.*99", json!("v2")).unwrap();
        assert_eq!(s.as_tree(), json!({"list_key": ["v0", "v1", "v2"]}));
    }

    #[test]
    fn nested_sequences_and_mappings_in_sequences() {
        let mut s = Splitter::default();
        s.set("grid.*0.*0", json!(1)).unwrap();
        s.set("grid.*0.*1", json!(2)).unwrap();
        s.set("grid.*5.*0", json!(3)).unwrap();
        assert_eq!(s.as_tree(), json!({"grid": [[1, 2], [3]]}));

        s.set("handlers.*0.urlRegex", json!("/.*")).unwrap();
        s.set("handlers.*0.script", json!("main")).unwrap();
        s.set("handlers.*3.urlRegex", json!("/api")).unwrap();
        assert_eq!(
            s.underlying()["handlers"],
            json!([{"urlRegex": "/.*", "script": "main"}, {"urlRegex": "/api"}])
        );
    }

    #[test]
    fn set_into_existing_sequence_element_mapping() {
        let mut s = splitter(json!({"handlers": [{"urlRegex": "/.*"}, "scalar"]}));
        s.set("handlers.*0.script", json!("app")).unwrap();
        s.set("handlers.*1.name", json!("n")).unwrap();
        assert_eq!(
            s.as_tree(),
            json!({"handlers": [{"urlRegex": "/.*", "script": "app"}, {"name": "n"}]})
        );
    }

    #[test]
    fn set_rejects_empty_and_root_index() {
        let mut s = Splitter::default();
        assert_eq!(s.set(Path::root(), json!(1)).unwrap_err(), SplitError::EmptyPath);
        assert!(matches!(
            s.set("*0", json!(1)),
            Err(SplitError::TypeMismatch { .. })
        ));
        assert!(matches!(s.set("a.*z", json!(1)), Err(SplitError::Type(_))));
        assert!(s.underlying().is_empty());
    }

    #[test]
    fn delete_top_level() {
        let mut s = splitter(example_dict());
        s.delete("key2").unwrap();
        assert!(!s.keys().contains(&path!["key2"]));
        assert_eq!(s.len(), 4);
        assert!(matches!(s.delete("abc.xyz"), Err(SplitError::KeyNotFound(_))));
    }

    #[test]
    fn delete_nested() {
        let mut s = splitter(example_nested_dict());
        s.delete(path!["key2", "nested_key1"]).unwrap();
        assert!(s.underlying().contains_key("key2"));
        assert!(!s.contains_path("key2.nested_key1"));
        assert!(s.contains_path("key2.nested_key2"));

        s.delete("key2.another_dict_key.hello").unwrap();
        assert!(s.contains_path("key2.nested_key2"));
        assert!(s.contains_path("key2.another_dict_key.bool"));
        assert!(!s.contains_path("key2.another_dict_key.hello"));
    }

    #[test]
    fn delete_list_element_shifts_later_elements() {
        let mut s = splitter(json!({"l": [1, 2, 3]}));
        s.delete("l.*1").unwrap();
        assert_eq!(s.as_tree(), json!({"l": [1, 3]}));
    }

    #[test]
    fn delete_last_leaf_of_mapping_drops_mapping() {
        let mut s = splitter(json!({"a": {"b": 1}, "c": 2}));
        s.delete("a.b").unwrap();
        assert_eq!(s.as_tree(), json!({"c": 2}));
    }

    #[test]
    fn display_is_compact_json() {
        let s = splitter(json!({"a": [1, {"b": null}]}));
        assert_eq!(s.to_string(), r#"{"a":[1,{"b":null}]}"#);
    }

    // ---- Properties ----

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(Value::from),
            "[a-z]{0,5}".prop_map(Value::String),
        ]
    }

    fn tree() -> impl Strategy<Value = Value> {
        prop_oneof![scalar(), Just(Value::Null)].prop_recursive(4, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    fn document() -> impl Strategy<Value = Map<String, Value>> {
        prop::collection::btree_map("[a-z]{1,3}", tree(), 0..5)
            .prop_map(|m| m.into_iter().collect())
    }

    fn dense_path() -> impl Strategy<Value = Path> {
        prop::collection::vec(
            prop_oneof![
                "[a-z]{1,3}".prop_map(Segment::Key),
                Just(Segment::Index(0)),
            ],
            0..4,
        )
        .prop_map(|tail| {
            let mut segments = vec![Segment::key("root")];
            segments.extend(tail);
            Path::new(segments)
        })
    }

    proptest! {
        #[test]
        fn leaf_paths_are_unique(root in document(), convert in any::<bool>()) {
            let s = Splitter::with_config(root, SplitterConfig::default().with_convert_lists(convert));
            let keys = s.keys();
            let unique: HashSet<&Path> = keys.iter().collect();
            prop_assert_eq!(unique.len(), keys.len());
        }

        #[test]
        fn set_then_get_round_trips(p in dense_path(), v in scalar()) {
            let mut s = Splitter::default();
            s.set(&p, v.clone()).unwrap();
            prop_assert_eq!(s.get(&p).unwrap(), &v);
        }

        #[test]
        fn delete_removes_exactly_one(root in document(), pick in any::<prop::sample::Index>()) {
            let s = Splitter::with_config(root, SplitterConfig::opaque_lists());
            let before: Vec<(Path, Value)> = s.leaves().map(|(p, v)| (p, v.clone())).collect();
            prop_assume!(!before.is_empty());
            let target = before[pick.index(before.len())].0.clone();

            let mut after = s.clone();
            after.delete(&target).unwrap();
            let remaining: Vec<(Path, Value)> = after.leaves().map(|(p, v)| (p, v.clone())).collect();

            let expected: Vec<(Path, Value)> =
                before.into_iter().filter(|(p, _)| *p != target).collect();
            prop_assert!(!after.contains_path(&target));
            prop_assert_eq!(remaining, expected);
        }
    }
}
