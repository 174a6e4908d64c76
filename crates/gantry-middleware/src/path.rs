//! Typed parameter paths and total deep-set mutation
//!
//! A [`ParameterPath`] is the parsed form of a dotted locator like
//! `"data.owner.id"`: a non-empty list of segments walked iteratively when
//! writing into an argument tree. The walk is total — missing intermediate
//! containers are created, non-container intermediates are replaced, and an
//! existing value at the leaf is overwritten.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error type for parameter path parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathParseError {
    #[error("parameter path is empty")]
    Empty,
    #[error("parameter path has an empty segment at position {0}")]
    EmptySegment(usize),
}

/// Parsed dotted path into an argument tree
///
/// # Examples
///
/// ```rust
/// use gantry_middleware::ParameterPath;
/// use serde_json::json;
///
/// let path: ParameterPath = "data.owner.id".parse().unwrap();
/// let mut args = json!({});
/// path.set(&mut args, json!("u1"));
/// assert_eq!(args, json!({"data": {"owner": {"id": "u1"}}}));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParameterPath {
    /// Path segments, guaranteed non-empty with non-empty entries
    segments: Vec<String>,
}

impl ParameterPath {
    /// Path segments in walk order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Write `value` at this path inside `root`
    ///
    /// Total mutation: intermediate objects are created where missing,
    /// non-object values along the path (including a non-object `root`) are
    /// replaced with fresh objects, and any existing value at the leaf is
    /// overwritten. Never fails, never panics.
    pub fn set(&self, root: &mut Value, value: Value) {
        let mut current = root;
        let last_index = self.segments.len() - 1;

        for segment in &self.segments[..last_index] {
            let map = force_object(current);
            current = map.entry(segment.clone()).or_insert(Value::Null);
        }

        let map = force_object(current);
        map.insert(self.segments[last_index].clone(), value);
    }
}

/// Replace `value` with an empty object unless it already is one
fn force_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

impl FromStr for ParameterPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathParseError::Empty);
        }
        let segments: Vec<String> = s.split('.').map(str::to_owned).collect();
        if let Some(index) = segments.iter().position(String::is_empty) {
            return Err(PathParseError::EmptySegment(index));
        }
        Ok(Self { segments })
    }
}

impl TryFrom<String> for ParameterPath {
    type Error = PathParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ParameterPath> for String {
    fn from(path: ParameterPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for ParameterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(s: &str) -> ParameterPath {
        s.parse().unwrap()
    }

    #[test]
    fn parses_dotted_segments() {
        assert_eq!(path("data.owner.id").segments(), ["data", "owner", "id"]);
        assert_eq!(path("id").segments(), ["id"]);
    }

    #[test]
    fn rejects_empty_paths_and_segments() {
        assert_eq!("".parse::<ParameterPath>(), Err(PathParseError::Empty));
        assert_eq!(
            "data..id".parse::<ParameterPath>(),
            Err(PathParseError::EmptySegment(1))
        );
        assert_eq!(
            ".data".parse::<ParameterPath>(),
            Err(PathParseError::EmptySegment(0))
        );
        assert_eq!(
            "data.".parse::<ParameterPath>(),
            Err(PathParseError::EmptySegment(1))
        );
    }

    #[test]
    fn round_trips_through_display() {
        assert_eq!(path("data.owner.id").to_string(), "data.owner.id");
    }

    #[test]
    fn sets_existing_nested_field() {
        let mut args = json!({"data": {"name": "x"}});
        path("data.ownerId").set(&mut args, json!("u1"));
        assert_eq!(args, json!({"data": {"name": "x", "ownerId": "u1"}}));
    }

    #[test]
    fn creates_missing_intermediate_containers() {
        let mut args = json!({});
        path("a.b.c").set(&mut args, json!("v"));
        assert_eq!(args, json!({"a": {"b": {"c": "v"}}}));
    }

    #[test]
    fn overwrites_existing_leaf_value() {
        let mut args = json!({"data": {"ownerId": "old"}});
        path("data.ownerId").set(&mut args, json!("u1"));
        assert_eq!(args, json!({"data": {"ownerId": "u1"}}));
    }

    #[test]
    fn replaces_non_object_intermediates() {
        let mut args = json!({"data": 42});
        path("data.ownerId").set(&mut args, json!("u1"));
        assert_eq!(args, json!({"data": {"ownerId": "u1"}}));
    }

    #[test]
    fn replaces_non_object_root() {
        let mut args = json!("scalar");
        path("id").set(&mut args, json!("u1"));
        assert_eq!(args, json!({"id": "u1"}));
    }

    #[test]
    fn single_segment_sets_top_level_field() {
        let mut args = json!({"other": 1});
        path("ownerId").set(&mut args, json!(null));
        assert_eq!(args, json!({"other": 1, "ownerId": null}));
    }

    #[test]
    fn deserializes_from_string_via_serde() {
        let parsed: ParameterPath = serde_json::from_value(json!("filter.orgId")).unwrap();
        assert_eq!(parsed, path("filter.orgId"));

        let err = serde_json::from_value::<ParameterPath>(json!("a..b"));
        assert!(err.is_err());
    }
}
