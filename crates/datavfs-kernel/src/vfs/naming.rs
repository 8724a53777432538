//! Derived names.
//!
//! Records are named `item_<id>.csv`. Inside a tree, a mapping entry is
//! named by its key and a sequence element by `item_<index>`; composite
//! children carry a trailing `/`, scalar sequence elements a `.json`
//! suffix. Element names depend only on index and shape, never content.
//!
//! A name that is not a valid path segment (empty, or containing `/` or
//! NUL) could be listed but never resolved, so it is never produced:
//! such mapping keys are left out of listings and such record ids fall
//! back to the missing-id policy.

use crate::config::{MissingIdPolicy, VfsConfig};
use crate::record::Record;
use crate::value::Value;

use super::error::{VfsError, VfsResult};
use super::path::VirtualPath;
use super::types::FileType;

/// Prefix shared by record and sequence element names.
pub const ITEM_PREFIX: &str = "item_";
/// Suffix of record file names.
pub const RECORD_SUFFIX: &str = ".csv";
/// Suffix of scalar sequence element names.
pub const ELEMENT_SUFFIX: &str = ".json";
/// Marker appended to directory names.
pub const DIR_MARKER: &str = "/";

/// File name for a record id.
pub fn record_name(id: &str) -> String {
    format!("{ITEM_PREFIX}{id}{RECORD_SUFFIX}")
}

/// Name a record under the configured missing-id policy.
///
/// An id that does not form a valid path segment is treated like a
/// missing one. `Ok(None)` means the record is skipped.
pub fn derive_record_name(
    record: &Record,
    row: usize,
    config: &VfsConfig,
) -> VfsResult<Option<String>> {
    if let Some(id) = record.get(&config.id_field) {
        let name = record_name(id);
        if VirtualPath::is_valid_segment(&name) {
            return Ok(Some(name));
        }
        tracing::warn!(row, id = %id.escape_debug(), "record id is not a valid file name");
        if config.missing_id == MissingIdPolicy::Reject {
            return Err(VfsError::invalid_path(name));
        }
    }
    match config.missing_id {
        MissingIdPolicy::Placeholder => {
            tracing::debug!(row, placeholder = %config.placeholder, "record has no usable id");
            let name = record_name(&config.placeholder);
            if !VirtualPath::is_valid_segment(&name) {
                return Err(VfsError::invalid_path(name));
            }
            Ok(Some(name))
        }
        MissingIdPolicy::Skip => {
            tracing::debug!(row, "skipping record without usable id");
            Ok(None)
        }
        MissingIdPolicy::Reject => Err(VfsError::missing_key(&config.id_field, row)),
    }
}

/// File or directory, by shape.
pub fn kind_of(value: &Value) -> FileType {
    if value.is_composite() {
        FileType::Directory
    } else {
        FileType::File
    }
}

/// Bare name of a sequence element (no directory marker).
pub fn index_stem(index: usize) -> String {
    format!("{ITEM_PREFIX}{index}")
}

/// Display name of a mapping entry.
pub fn key_name(key: &str, value: &Value) -> String {
    match kind_of(value) {
        FileType::Directory => format!("{key}{DIR_MARKER}"),
        FileType::File => key.to_string(),
    }
}

/// Display name of a sequence element.
pub fn index_name(index: usize, element: &Value) -> String {
    let stem = index_stem(index);
    match kind_of(element) {
        FileType::Directory => format!("{stem}{DIR_MARKER}"),
        FileType::File => format!("{stem}{ELEMENT_SUFFIX}"),
    }
}

/// Immediate children as (bare name, display name, kind), in order.
///
/// The bare name is what a path segment must equal to reach the child.
/// Mapping keys that cannot be spelled as a segment are skipped. `None`
/// for scalars.
pub fn children(value: &Value) -> Option<Vec<(String, String, FileType)>> {
    match value {
        Value::Mapping(map) => Some(
            map.iter()
                .filter(|(key, _)| {
                    let addressable = VirtualPath::is_valid_segment(key);
                    if !addressable {
                        tracing::warn!(key = %key.escape_debug(), "skipping unaddressable key");
                    }
                    addressable
                })
                .map(|(key, child)| (key.clone(), key_name(key, child), kind_of(child)))
                .collect(),
        ),
        Value::Sequence(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(i, child)| (index_stem(i), index_name(i, child), kind_of(child)))
                .collect(),
        ),
        _ => None,
    }
}

/// Index addressed by a path segment within a sequence.
///
/// Accepts `item_<i>` for any element and `item_<i>.json` for scalar
/// elements. The index must be written canonically (`item_01` does not
/// match).
pub fn match_index(segment: &str, items: &[Value]) -> Option<usize> {
    let rest = segment.strip_prefix(ITEM_PREFIX)?;
    let (digits, suffixed) = match rest.strip_suffix(ELEMENT_SUFFIX) {
        Some(digits) => (digits, true),
        None => (rest, false),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    let index: usize = digits.parse().ok()?;
    let element = items.get(index)?;
    if suffixed && element.is_composite() {
        return None;
    }
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingIdPolicy;
    use serde_json::json;

    #[test]
    fn test_record_name() {
        let record = Record::new().with("id", "42").with("name", "x");
        let name = derive_record_name(&record, 0, &VfsConfig::default()).unwrap();
        assert_eq!(name.as_deref(), Some("item_42.csv"));
    }

    #[test]
    fn test_missing_id_policies() {
        let record = Record::new().with("name", "orphan");

        let placeholder = derive_record_name(&record, 0, &VfsConfig::default()).unwrap();
        assert_eq!(placeholder.as_deref(), Some("item_unknown.csv"));

        let skip = VfsConfig::default().with_missing_id(MissingIdPolicy::Skip);
        assert_eq!(derive_record_name(&record, 0, &skip).unwrap(), None);

        let reject = VfsConfig::default().with_missing_id(MissingIdPolicy::Reject);
        let err = derive_record_name(&record, 5, &reject).unwrap_err();
        assert!(matches!(err, VfsError::MissingKey { row: 5, .. }));
    }

    #[test]
    fn test_custom_id_field() {
        let record = Record::new().with("sku", "A-1");
        let config = VfsConfig::default().with_id_field("sku");
        let name = derive_record_name(&record, 0, &config).unwrap();
        assert_eq!(name.as_deref(), Some("item_A-1.csv"));
    }

    #[test]
    fn test_unusable_ids_follow_missing_id_policy() {
        let slash = Record::new().with("id", "a/b");
        let nul = Record::new().with("id", "a\0b");

        let config = VfsConfig::default();
        for record in [&slash, &nul] {
            let name = derive_record_name(record, 0, &config).unwrap();
            assert_eq!(name.as_deref(), Some("item_unknown.csv"));
        }

        // The affixes keep an empty id addressable.
        let empty = Record::new().with("id", "");
        let name = derive_record_name(&empty, 0, &config).unwrap();
        assert_eq!(name.as_deref(), Some("item_.csv"));

        let skip = VfsConfig::default().with_missing_id(MissingIdPolicy::Skip);
        assert_eq!(derive_record_name(&slash, 0, &skip).unwrap(), None);

        let reject = VfsConfig::default().with_missing_id(MissingIdPolicy::Reject);
        let err = derive_record_name(&slash, 3, &reject).unwrap_err();
        assert!(matches!(err, VfsError::InvalidPath(_)));
    }

    #[test]
    fn test_unusable_placeholder_is_rejected() {
        let record = Record::new().with("name", "orphan");
        let config = VfsConfig {
            placeholder: "x/y".to_string(),
            ..VfsConfig::default()
        };
        let err = derive_record_name(&record, 0, &config).unwrap_err();
        assert!(matches!(err, VfsError::InvalidPath(_)));
    }

    #[test]
    fn test_unaddressable_keys_are_not_listed() {
        let value = Value::from(json!({"a/b": 1, "": 2, "nul\0": 3, "ok": 4}));
        let names: Vec<_> = children(&value)
            .unwrap()
            .into_iter()
            .map(|(name, _, _)| name)
            .collect();
        assert_eq!(names, vec!["ok"]);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_name("version", &Value::from("1.0")), "version");
        assert_eq!(key_name("settings", &Value::empty_mapping()), "settings/");
        assert_eq!(key_name("tags", &Value::Sequence(vec![])), "tags/");
    }

    #[test]
    fn test_index_names_depend_on_shape_only() {
        let a = Value::from(json!([1, {"x": 1}, "s"]));
        let b = Value::from(json!([true, [], null]));
        let names = |v: &Value| -> Vec<String> {
            children(v).unwrap().into_iter().map(|(_, name, _)| name).collect()
        };
        assert_eq!(names(&a), vec!["item_0.json", "item_1/", "item_2.json"]);
        assert_eq!(names(&a), names(&b));
    }

    #[test]
    fn test_scalar_has_no_children() {
        assert!(children(&Value::from(3i64)).is_none());
    }

    #[test]
    fn test_match_index() {
        let items = vec![Value::from("a"), Value::empty_mapping()];
        assert_eq!(match_index("item_0", &items), Some(0));
        assert_eq!(match_index("item_0.json", &items), Some(0));
        assert_eq!(match_index("item_1", &items), Some(1));
        assert_eq!(match_index("item_1.json", &items), None);
        assert_eq!(match_index("item_2", &items), None);
        assert_eq!(match_index("item_00", &items), None);
        assert_eq!(match_index("item_", &items), None);
        assert_eq!(match_index("item_+1", &items), None);
        assert_eq!(match_index("0", &items), None);
    }
}
