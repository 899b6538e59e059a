//! Dotted and bracketed value paths
//!
//! Input names such as `foo[0].a` or `address.city` locate a slice of a
//! form value. Parsing is lenient and never fails: anything that is not a
//! plain array index becomes an object key.

use serde_json::{Map, Value};
use std::fmt;

/// One step into a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    fn from_token(token: &str) -> Self {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = token.parse() {
                return PathSegment::Index(index);
            }
        }
        PathSegment::Key(token.to_string())
    }

    fn from_bracket(inner: &str) -> Self {
        let inner = inner.trim();
        let quoted = inner.len() >= 2
            && ((inner.starts_with('"') && inner.ends_with('"'))
                || (inner.starts_with('\'') && inner.ends_with('\'')));
        if quoted {
            PathSegment::Key(inner[1..inner.len() - 1].to_string())
        } else {
            Self::from_token(inner)
        }
    }

    /// Segment as an object key
    pub fn key(&self) -> String {
        match self {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Index(index) => index.to_string(),
        }
    }
}

/// A parsed value path
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn parse(input: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = input.chars();

        while let Some(c) = chars.next() {
            match c {
                '.' => flush(&mut current, &mut segments),
                '[' => {
                    flush(&mut current, &mut segments);
                    let mut inner = String::new();
                    let mut quote: Option<char> = None;
                    for c in chars.by_ref() {
                        match (quote, c) {
                            (None, ']') => break,
                            (None, '"' | '\'') => quote = Some(c),
                            (Some(q), c) if q == c => quote = None,
                            _ => {}
                        }
                        inner.push(c);
                    }
                    segments.push(PathSegment::from_bracket(&inner));
                }
                _ => current.push(c),
            }
        }
        flush(&mut current, &mut segments);

        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn flush(current: &mut String, segments: &mut Vec<PathSegment>) {
    if !current.is_empty() {
        segments.push(PathSegment::from_token(&std::mem::take(current)));
    }
}

impl From<&str> for Path {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) if key.contains(['.', '[', ']']) || key.is_empty() => {
                    write!(f, "[\"{key}\"]")?
                }
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
            }
        }
        Ok(())
    }
}

/// Compose a child name under a form prefix
pub fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else if name.is_empty() {
        prefix.to_string()
    } else if name.starts_with('[') {
        format!("{prefix}{name}")
    } else {
        format!("{prefix}.{name}")
    }
}

/// Borrow the value at `path`, if every step exists
pub fn get<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    path.segments
        .iter()
        .try_fold(root, |current, segment| match (segment, current) {
            (PathSegment::Index(index), Value::Array(items)) => items.get(*index),
            (segment, Value::Object(map)) => map.get(&segment.key()),
            _ => None,
        })
}

/// Value at a named path, `null` when missing
pub fn resolve(root: &Value, name: &str) -> Value {
    get(root, &Path::parse(name)).cloned().unwrap_or(Value::Null)
}

/// Replace-on-write assignment.
///
/// Returns a new root with `value` stored at `path`; `root` is untouched.
/// Missing containers are created as arrays when the step is an index and
/// as objects otherwise.
pub fn set(root: &Value, path: &Path, value: Value) -> Value {
    let mut next = root.clone();
    assign(&mut next, &path.segments, value);
    next
}

/// Largest index `set` will pad an array up to. Bigger indices address
/// object keys instead, unless the target already is an array.
const MAX_ARRAY_INDEX: usize = 1 << 16;

fn assign(target: &mut Value, segments: &[PathSegment], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *target = value;
        return;
    };

    match head {
        PathSegment::Index(index) if !target.is_object() && *index <= MAX_ARRAY_INDEX => {
            if !target.is_array() {
                *target = Value::Array(Vec::new());
            }
            if let Value::Array(items) = target {
                if let Some(len) = index.checked_add(1).filter(|len| items.len() < *len) {
                    items.resize(len, Value::Null);
                }
                assign(&mut items[*index], rest, value);
            }
        }
        PathSegment::Index(index) if target.is_array() => {
            tracing::warn!(index, "array index past padding limit, value not stored");
        }
        _ => {
            if !target.is_object() {
                *target = Value::Object(Map::new());
            }
            if let Value::Object(map) = target {
                let slot = map.entry(head.key()).or_insert(Value::Null);
                assign(slot, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    mod parsing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_dotted_keys() {
            let path = Path::parse("foo.bar");
            assert_eq!(
                path.segments(),
                &[
                    PathSegment::Key("foo".to_string()),
                    PathSegment::Key("bar".to_string())
                ]
            );
        }

        #[test]
        fn test_bracket_index() {
            let path = Path::parse("foo[0].a");
            assert_eq!(
                path.segments(),
                &[
                    PathSegment::Key("foo".to_string()),
                    PathSegment::Index(0),
                    PathSegment::Key("a".to_string())
                ]
            );
        }

        #[test]
        fn test_dotted_number_is_index() {
            let path = Path::parse("items.2");
            assert_eq!(path.segments()[1], PathSegment::Index(2));
        }

        #[test]
        fn test_quoted_bracket_key_keeps_dots() {
            let path = Path::parse(r#"foo["a.b"]"#);
            assert_eq!(path.segments()[1], PathSegment::Key("a.b".to_string()));
        }

        #[test]
        fn test_empty_name_is_empty_path() {
            assert!(Path::parse("").is_empty());
        }

        #[test]
        fn test_display_round_trips_canonical_form() {
            assert_eq!(Path::parse("foo.0.a").to_string(), "foo[0].a");
            assert_eq!(Path::parse(r#"x['a.b']"#).to_string(), r#"x["a.b"]"#);
        }
    }

    mod joining {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_join_with_empty_prefix() {
            assert_eq!(join("", "bar"), "bar");
        }

        #[test]
        fn test_join_dotted() {
            assert_eq!(join("foo", "bar"), "foo.bar");
        }

        #[test]
        fn test_join_bracket_child() {
            assert_eq!(join("foo", "[0].a"), "foo[0].a");
        }
    }

    mod reading {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_resolve_nested_object() {
            let value = json!({"foo": {"bar": "V"}});
            assert_eq!(resolve(&value, "foo.bar"), json!("V"));
        }

        #[test]
        fn test_resolve_inside_array() {
            let value = json!({"foo": [{"a": "VAL"}]});
            assert_eq!(resolve(&value, "foo[0].a"), json!("VAL"));
        }

        #[test]
        fn test_resolve_missing_is_null() {
            let value = json!({"foo": "BAR"});
            assert_eq!(resolve(&value, "nope.deeper"), Value::Null);
            assert_eq!(resolve(&value, "foo[3]"), Value::Null);
        }

        #[test]
        fn test_resolve_numeric_key_on_object() {
            let value = json!({"0": "zero"});
            assert_eq!(resolve(&value, "[0]"), json!("zero"));
        }

        #[test]
        fn test_get_empty_path_is_root() {
            let value = json!({"a": 1});
            assert_eq!(get(&value, &Path::default()), Some(&value));
        }
    }

    mod writing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_set_leaves_original_untouched() {
            let original = json!({"foo": "BAR", "keep": 1});
            let updated = set(&original, &Path::parse("foo"), json!("NEW"));
            assert_eq!(original, json!({"foo": "BAR", "keep": 1}));
            assert_eq!(updated, json!({"foo": "NEW", "keep": 1}));
        }

        #[test]
        fn test_set_inside_array() {
            let original = json!({"foo": [{"a": "VAL", "b": 2}]});
            let updated = set(&original, &Path::parse("foo[0].a"), json!("NEW"));
            assert_eq!(updated, json!({"foo": [{"a": "NEW", "b": 2}]}));
        }

        #[test]
        fn test_set_creates_missing_containers() {
            let updated = set(&Value::Null, &Path::parse("a[1].b"), json!(true));
            assert_eq!(updated, json!({"a": [null, {"b": true}]}));
        }

        #[test]
        fn test_set_overwrites_scalar_on_the_way() {
            let updated = set(&json!({"a": 5}), &Path::parse("a.b"), json!(1));
            assert_eq!(updated, json!({"a": {"b": 1}}));
        }

        #[test]
        fn test_set_huge_index_becomes_key() {
            let name = "a[18446744073709551615]";
            let updated = set(&Value::Null, &Path::parse(name), json!(1));
            assert_eq!(updated, json!({"a": {"18446744073709551615": 1}}));
            assert_eq!(resolve(&updated, name), json!(1));

            let updated = set(&Value::Null, &Path::parse("a[4000000000]"), json!(2));
            assert_eq!(updated, json!({"a": {"4000000000": 2}}));
        }

        #[test]
        fn test_set_huge_index_into_array_keeps_array() {
            let original = json!({"a": [1]});
            let updated = set(&original, &Path::parse("a[4000000000]"), json!(2));
            assert_eq!(updated, original);
        }

        #[test]
        fn test_set_pads_up_to_limit() {
            let updated = set(&Value::Null, &Path::parse("[3]"), json!("x"));
            assert_eq!(updated, json!([null, null, null, "x"]));
        }

        #[test]
        fn test_set_empty_path_replaces_root() {
            let updated = set(&json!({"a": 5}), &Path::default(), json!([1]));
            assert_eq!(updated, json!([1]));
        }
    }
}
