// Flattened container: glob path resolution over nested data

use crate::adapter::{self, ValidationData};
use crate::errors::ValidationError;
use indexmap::IndexMap;
use log::trace;
use serde::Serialize;
use serde_json::Value;

/// Read-only index over a nested container, resolving `/`-separated path
/// globs to concrete `(path, value)` pairs.
///
/// A `*` segment matches exactly one key or index at that level (never
/// recursively); several `*` segments expand cartesian-style. The index is
/// immutable after construction, so queries are idempotent.
#[derive(Debug, Clone)]
pub struct FlattenedContainer {
    root: Value,
}

impl FlattenedContainer {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Build from anything exposing validation data (see [`ValidationData`]).
    pub fn from_data<D: ValidationData + ?Sized>(data: &D) -> Result<Self, ValidationError> {
        Ok(Self::new(data.validation_data()?))
    }

    /// Build from any serializable type via its serialization shape.
    pub fn from_serialize<T: Serialize + ?Sized>(data: &T) -> Result<Self, ValidationError> {
        Ok(Self::new(adapter::from_serialize(data)?))
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Resolve a path glob to an ordered mapping of concrete path → value.
    ///
    /// A concrete path resolves to at most one entry; an unreachable segment
    /// (including descent into a scalar) yields an empty result rather than
    /// an error. Overlapping resolutions dedup by concrete path, first
    /// resolution order preserved.
    pub fn find(&self, glob: &str) -> IndexMap<String, Value> {
        let segments: Vec<&str> = glob.split('/').collect();
        let mut found = IndexMap::new();
        resolve(&self.root, &segments, String::new(), &mut found);
        trace!(
            target: "palisade::paths",
            "glob `{glob}` resolved to {} concrete path(s)",
            found.len()
        );
        found
    }
}

fn resolve(node: &Value, segments: &[&str], prefix: String, found: &mut IndexMap<String, Value>) {
    let Some((segment, rest)) = segments.split_first() else {
        if !found.contains_key(&prefix) {
            found.insert(prefix, node.clone());
        }
        return;
    };

    match node {
        Value::Object(fields) => {
            if *segment == "*" {
                for (key, child) in fields {
                    resolve(child, rest, join(&prefix, key), found);
                }
            } else if let Some(child) = fields.get(*segment) {
                resolve(child, rest, join(&prefix, segment), found);
            }
        }
        Value::Array(items) => {
            if *segment == "*" {
                for (index, child) in items.iter().enumerate() {
                    resolve(child, rest, join(&prefix, &index.to_string()), found);
                }
            } else if let Some(child) = segment.parse::<usize>().ok().and_then(|i| items.get(i)) {
                resolve(child, rest, join(&prefix, segment), found);
            }
        }
        // Scalar parent: the path does not exist.
        _ => {}
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}/{segment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> FlattenedContainer {
        FlattenedContainer::new(json!({
            "user": {
                "name": "ada",
                "address": {"city": "london"},
            },
            "tags": ["alpha", "beta"],
            "teams": [
                {"members": ["a", "b"]},
                {"members": ["c"]},
            ],
        }))
    }

    #[test]
    fn test_concrete_path_single_entry() {
        let found = fixture().find("user/name");
        assert_eq!(found.len(), 1);
        assert_eq!(found["user/name"], json!("ada"));
    }

    #[test]
    fn test_unreachable_path_is_empty() {
        assert!(fixture().find("user/missing").is_empty());
        assert!(fixture().find("user/name/deeper").is_empty());
        assert!(fixture().find("").is_empty());
    }

    #[test]
    fn test_subtree_returned_whole() {
        let found = fixture().find("user");
        assert_eq!(
            found["user"],
            json!({"name": "ada", "address": {"city": "london"}})
        );
    }

    #[test]
    fn test_array_index_path() {
        let found = fixture().find("tags/1");
        assert_eq!(found["tags/1"], json!("beta"));
        assert!(fixture().find("tags/7").is_empty());
    }

    #[test]
    fn test_wildcard_one_level() {
        let found = fixture().find("tags/*");
        let paths: Vec<_> = found.keys().cloned().collect();
        assert_eq!(paths, ["tags/0", "tags/1"]);
    }

    #[test]
    fn test_wildcard_cartesian_expansion() {
        let found = fixture().find("teams/*/members/*");
        // 2 teams x their member counts: 2 + 1 = 3 concrete paths.
        assert_eq!(found.len(), 3);
        let paths: Vec<_> = found.keys().cloned().collect();
        assert_eq!(
            paths,
            ["teams/0/members/0", "teams/0/members/1", "teams/1/members/0"]
        );
    }

    #[test]
    fn test_wildcard_matches_exactly_one_segment() {
        // `*` must not recurse: user/* stops at the first level below user.
        let found = fixture().find("user/*");
        let paths: Vec<_> = found.keys().cloned().collect();
        assert_eq!(paths, ["user/name", "user/address"]);
    }

    #[test]
    fn test_find_is_idempotent() {
        let container = fixture();
        let a = container.find("teams/*/members/*");
        let b = container.find("teams/*/members/*");
        assert_eq!(a, b);
    }

    #[test]
    fn test_object_key_order_preserved() {
        let container = FlattenedContainer::new(json!({"b": 1, "a": 2, "c": 3}));
        let paths: Vec<_> = container.find("*").keys().cloned().collect();
        assert_eq!(paths, ["b", "a", "c"]);
    }
}
