//! Nested namespace over a value tree.
//!
//! Mappings and sequences are directories, scalars are files.

use std::sync::Arc;

use crate::value::Value;
use crate::vfs::error::{VfsError, VfsResult};
use crate::vfs::naming;
use crate::vfs::ops::{SourceOps, SourceShape};
use crate::vfs::path::VirtualPath;
use crate::vfs::resolver;
use crate::vfs::types::{DirEntry, Directory, DirectoryNode, File, FileContent, VirtualEntry};

/// Source backend for hierarchical data.
#[derive(Debug, Clone)]
pub struct TreeBackend {
    root: Arc<Value>,
}

impl Default for TreeBackend {
    fn default() -> Self {
        Self::new(Value::empty_mapping())
    }
}

impl TreeBackend {
    pub fn new(root: Value) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    /// Resolve to a composite node, or explain why not.
    fn directory_node(&self, path: &VirtualPath) -> VfsResult<&Value> {
        let node = resolver::resolve(&self.root, path)?;
        if node.is_scalar() {
            return Err(VfsError::not_a_directory(path.to_string()));
        }
        Ok(node)
    }
}

impl SourceOps for TreeBackend {
    fn shape(&self) -> SourceShape {
        SourceShape::Hierarchical
    }

    fn list(&self, path: &VirtualPath) -> VfsResult<Vec<String>> {
        let node = self.directory_node(path)?;
        let prefix = path.dir_prefix();
        Ok(naming::children(node)
            .unwrap_or_default()
            .into_iter()
            .map(|(_, display, _)| format!("{prefix}{display}"))
            .collect())
    }

    fn read_dir(&self, path: &VirtualPath) -> VfsResult<Vec<DirEntry>> {
        let node = self.directory_node(path)?;
        Ok(naming::children(node)
            .unwrap_or_default()
            .into_iter()
            .map(|(name, _, kind)| DirEntry::new(name, kind))
            .collect())
    }

    fn resolve(&self, path: &VirtualPath) -> VfsResult<VirtualEntry> {
        let node = resolver::resolve(&self.root, path)?;
        let entry = if node.is_composite() {
            VirtualEntry::Directory(Directory::new(
                path.clone(),
                DirectoryNode::Tree(Arc::clone(&self.root)),
            ))
        } else {
            VirtualEntry::File(File::new(path.clone(), FileContent::Scalar(node.clone())))
        };
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::types::FileType;
    use serde_json::json;

    fn backend() -> TreeBackend {
        TreeBackend::new(Value::from(json!({
            "app_settings": {"version": "1.2.0", "notifications": {"enabled": true}},
            "user_profiles": [{"id": "user_101"}, {"id": "user_102"}],
            "ports": [80, 443]
        })))
    }

    fn path(raw: &str) -> VirtualPath {
        VirtualPath::normalize(raw).unwrap()
    }

    #[test]
    fn test_list_root() {
        let fs = backend();
        assert_eq!(
            fs.list(&path("/")).unwrap(),
            vec!["/app_settings/", "/user_profiles/", "/ports/"]
        );
    }

    #[test]
    fn test_list_sequence() {
        let fs = backend();
        assert_eq!(
            fs.list(&path("/user_profiles/")).unwrap(),
            vec!["/user_profiles/item_0/", "/user_profiles/item_1/"]
        );
        assert_eq!(
            fs.list(&path("ports")).unwrap(),
            vec!["/ports/item_0.json", "/ports/item_1.json"]
        );
    }

    #[test]
    fn test_list_errors() {
        let fs = backend();
        assert!(matches!(
            fs.list(&path("/app_settings/version")),
            Err(VfsError::NotADirectory(_))
        ));
        assert!(fs.list(&path("/nope")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_read_dir_bare_names() {
        let fs = backend();
        let entries = fs.read_dir(&path("/app_settings")).unwrap();
        assert_eq!(
            entries,
            vec![
                DirEntry::new("version", FileType::File),
                DirEntry::new("notifications", FileType::Directory),
            ]
        );
    }

    #[test]
    fn test_resolve_classifies() {
        let fs = backend();
        assert!(fs.resolve(&path("/")).unwrap().is_dir());
        assert!(fs.resolve(&path("/user_profiles/item_0")).unwrap().is_dir());
        let version = fs.resolve(&path("/app_settings/version")).unwrap();
        assert!(version.is_file());
        assert_eq!(version.render(true).unwrap(), "1.2.0");
        assert_eq!(fs.resolve(&path("/ports/item_1.json")).unwrap().render(true).unwrap(), "443");
    }

    #[test]
    fn test_unaddressable_keys_are_skipped() {
        let fs = TreeBackend::new(Value::from(json!({
            "a/b": 1,
            "": {"inner": 2},
            "ok": 3
        })));
        assert_eq!(fs.list(&path("/")).unwrap(), vec!["/ok"]);
        assert_eq!(fs.read_dir(&path("/")).unwrap(), vec![DirEntry::file("ok")]);
        for name in fs.list(&path("/")).unwrap() {
            assert!(fs.resolve(&path(&name)).is_ok(), "{name}");
        }
        assert!(fs.resolve(&path("/a/b")).unwrap_err().is_not_found());

        // The subtree render still carries every key.
        let rendered: serde_json::Value =
            serde_json::from_str(&fs.read(&path("/"), false).unwrap()).unwrap();
        assert_eq!(rendered, json!({"a/b": 1, "": {"inner": 2}, "ok": 3}));
    }

    #[test]
    fn test_empty_tree() {
        let fs = TreeBackend::default();
        assert!(fs.list(&path("/")).unwrap().is_empty());
        assert!(fs.resolve(&path("/x")).unwrap_err().is_not_found());
    }
}
