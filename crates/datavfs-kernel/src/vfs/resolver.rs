//! Segment-by-segment resolution over a value tree.

use crate::value::Value;

use super::error::{VfsError, VfsResult};
use super::naming;
use super::path::VirtualPath;

/// Locate the node addressed by `path`.
///
/// Mapping hops match keys exactly; sequence hops match derived element
/// names. A single missing hop, or any hop below a scalar, fails the whole
/// path with `NotFound`. The root path resolves to `root`.
pub fn resolve<'a>(root: &'a Value, path: &VirtualPath) -> VfsResult<&'a Value> {
    let mut node = root;
    for segment in path.segments() {
        node = step(node, segment).ok_or_else(|| VfsError::not_found(path.to_string()))?;
    }
    Ok(node)
}

fn step<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Mapping(map) => map.get(segment),
        Value::Sequence(items) => {
            naming::match_index(segment, items).map(|index| &items[index])
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        Value::from(json!({
            "app_settings": {"version": "1.2.0", "notifications": {"enabled": true}},
            "user_profiles": [{"id": "user_101"}, {"id": "user_102"}],
            "tags": ["a", "b"],
            "item_0": "literal key"
        }))
    }

    fn at<'a>(root: &'a Value, raw: &str) -> VfsResult<&'a Value> {
        resolve(root, &VirtualPath::normalize(raw).unwrap())
    }

    #[test]
    fn test_root() {
        let root = sample();
        assert_eq!(at(&root, "/").unwrap(), &root);
    }

    #[test]
    fn test_mapping_hops() {
        let root = sample();
        assert_eq!(at(&root, "/app_settings/version").unwrap(), &Value::from("1.2.0"));
        assert_eq!(
            at(&root, "app_settings/notifications/enabled").unwrap(),
            &Value::from(true)
        );
    }

    #[test]
    fn test_mapping_keys_are_literal() {
        let root = sample();
        assert_eq!(at(&root, "/item_0").unwrap(), &Value::from("literal key"));
        assert!(at(&root, "/app_settings/").is_ok());
    }

    #[test]
    fn test_sequence_hops() {
        let root = sample();
        assert_eq!(
            at(&root, "/user_profiles/item_1/id").unwrap(),
            &Value::from("user_102")
        );
        assert_eq!(at(&root, "/tags/item_1.json").unwrap(), &Value::from("b"));
        assert_eq!(at(&root, "/tags/item_0").unwrap(), &Value::from("a"));
    }

    #[test]
    fn test_missing_hop_fails_whole_path() {
        let root = sample();
        let err = at(&root, "/missing/x").unwrap_err();
        assert!(matches!(err, VfsError::NotFound(ref p) if p == "/missing/x"));
        assert!(at(&root, "/user_profiles/item_2").unwrap_err().is_not_found());
        assert!(at(&root, "/user_profiles/0").unwrap_err().is_not_found());
    }

    #[test]
    fn test_cannot_descend_into_scalar() {
        let root = sample();
        assert!(at(&root, "/app_settings/version/x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_deep_nesting() {
        let mut value = Value::from("leaf");
        let depth = 1_000;
        for _ in 0..depth {
            value = Value::Sequence(vec![value]);
        }
        let path = VirtualPath::from_segments(std::iter::repeat_n("item_0", depth)).unwrap();
        assert_eq!(resolve(&value, &path).unwrap(), &Value::from("leaf"));
    }
}
