//! Source operations trait.
//!
//! Path-based and read-only. Every operation is a pure function of the
//! loaded source and the path; there are no handles or cursors.

use std::fmt;

use super::error::VfsResult;
use super::path::VirtualPath;
use super::types::{DirEntry, EntryInfo, FileType, VirtualEntry};

/// Shape of the data behind a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceShape {
    /// Flat records, one file each.
    Tabular,
    /// Nested mappings and sequences.
    Hierarchical,
}

/// Core source operations trait.
///
/// Implementations hold an immutable snapshot, so every method may be
/// called concurrently from any number of threads.
pub trait SourceOps: Send + Sync + fmt::Debug {
    fn shape(&self) -> SourceShape;

    /// Child names of the directory at `path`, as the source displays them.
    fn list(&self, path: &VirtualPath) -> VfsResult<Vec<String>>;

    /// Immediate children of the directory at `path`, by bare name.
    fn read_dir(&self, path: &VirtualPath) -> VfsResult<Vec<DirEntry>>;

    /// Classify the node at `path`.
    fn resolve(&self, path: &VirtualPath) -> VfsResult<VirtualEntry>;

    // ========================================================================
    // Convenience methods (default implementations)
    // ========================================================================

    /// Check if a path exists.
    fn exists(&self, path: &VirtualPath) -> bool {
        self.resolve(path).is_ok()
    }

    /// Render the content at `path`.
    fn read(&self, path: &VirtualPath, pretty: bool) -> VfsResult<String> {
        self.resolve(path)?.render(pretty)
    }

    /// Kind, child count and rendered size of the entry at `path`.
    fn stat(&self, path: &VirtualPath, pretty: bool) -> VfsResult<EntryInfo> {
        let entry = self.resolve(path)?;
        let size = entry.render(pretty)?.len() as u64;
        let children = entry.as_directory().map(|dir| dir.child_count());
        Ok(EntryInfo {
            path: path.to_string(),
            kind: entry.kind(),
            children,
            size,
        })
    }

    /// True when `path` resolves to a directory.
    fn is_dir(&self, path: &VirtualPath) -> bool {
        self.resolve(path)
            .map(|e| e.kind() == FileType::Directory)
            .unwrap_or(false)
    }
}
