//! Core VFS types.
//!
//! Entries are detached from the filesystem that produced them: they hold
//! shared references into the snapshot they were resolved against, so a
//! reload never changes what an existing entry lists or renders.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::value::Value;

use super::backends::RecordIndex;
use super::error::{VfsError, VfsResult};
use super::naming;
use super::path::VirtualPath;
use super::render;
use super::resolver;

/// File type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    /// Scalar value or whole record.
    File,
    /// Mapping, sequence, or the tabular root.
    Directory,
}

impl FileType {
    /// Returns true if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, FileType::File)
    }

    /// Returns true if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, FileType::Directory)
    }
}

/// Directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Segment that addresses the entry (no directory marker).
    pub name: String,
    /// Entry type.
    pub kind: FileType,
}

impl DirEntry {
    /// Create a new directory entry.
    pub fn new(name: impl Into<String>, kind: FileType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, FileType::File)
    }

    /// Create a directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, FileType::Directory)
    }
}

/// Summary of a resolved entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryInfo {
    pub path: String,
    pub kind: FileType,
    /// Number of immediate children, directories only.
    pub children: Option<usize>,
    /// Byte length of the rendered content.
    pub size: u64,
}

/// Resolution result.
#[derive(Debug, Clone, PartialEq)]
pub enum VirtualEntry {
    Directory(Directory),
    File(File),
}

impl VirtualEntry {
    pub fn path(&self) -> &VirtualPath {
        match self {
            VirtualEntry::Directory(dir) => &dir.path,
            VirtualEntry::File(file) => &file.path,
        }
    }

    pub fn kind(&self) -> FileType {
        match self {
            VirtualEntry::Directory(_) => FileType::Directory,
            VirtualEntry::File(_) => FileType::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.kind().is_file()
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            VirtualEntry::Directory(dir) => Some(dir),
            VirtualEntry::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            VirtualEntry::File(file) => Some(file),
            VirtualEntry::Directory(_) => None,
        }
    }

    /// Render the entry's content.
    ///
    /// Files render their payload; directories render their whole subtree.
    pub fn render(&self, pretty: bool) -> VfsResult<String> {
        match self {
            VirtualEntry::Directory(dir) => dir.render(pretty),
            VirtualEntry::File(file) => file.render(pretty),
        }
    }
}

/// What a directory entry is backed by.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DirectoryNode {
    /// A composite node of a value tree, addressed from the tree root.
    Tree(Arc<Value>),
    /// The flat root of a tabular source.
    Table(Arc<RecordIndex>),
}

/// A resolved directory. Children are computed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    path: VirtualPath,
    node: DirectoryNode,
}

impl Directory {
    pub(crate) fn new(path: VirtualPath, node: DirectoryNode) -> Self {
        Self { path, node }
    }

    pub fn path(&self) -> &VirtualPath {
        &self.path
    }

    fn tree_node<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        resolver::resolve(root, &self.path).ok()
    }

    /// Immediate children, in source order.
    pub fn children(&self) -> Vec<DirEntry> {
        match &self.node {
            DirectoryNode::Tree(root) => self
                .tree_node(root)
                .and_then(naming::children)
                .unwrap_or_default()
                .into_iter()
                .map(|(name, _, kind)| DirEntry::new(name, kind))
                .collect(),
            DirectoryNode::Table(index) => index.names().map(DirEntry::file).collect(),
        }
    }

    /// Child names as listed: absolute with a directory marker for tree
    /// sources, bare record names for tabular ones.
    pub fn listing(&self) -> Vec<String> {
        match &self.node {
            DirectoryNode::Tree(root) => {
                let prefix = self.path.dir_prefix();
                self.tree_node(root)
                    .and_then(naming::children)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(_, display, _)| format!("{prefix}{display}"))
                    .collect()
            }
            DirectoryNode::Table(index) => index.names().map(String::from).collect(),
        }
    }

    pub fn child_count(&self) -> usize {
        match &self.node {
            DirectoryNode::Tree(root) => self
                .tree_node(root)
                .and_then(naming::children)
                .map_or(0, |children| children.len()),
            DirectoryNode::Table(index) => index.len(),
        }
    }

    /// Render the whole subtree.
    pub fn render(&self, pretty: bool) -> VfsResult<String> {
        match &self.node {
            DirectoryNode::Tree(root) => match self.tree_node(root) {
                Some(node) => render::render_value(node, pretty),
                None => Err(VfsError::not_found(self.path.to_string())),
            },
            DirectoryNode::Table(index) => render::render_table(index.headers(), index.records()),
        }
    }
}

/// Payload of a file entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FileContent {
    /// A scalar leaf of a value tree.
    Scalar(Value),
    /// A whole record, with the header order of its source.
    Record {
        headers: Arc<[String]>,
        record: Record,
    },
}

/// A resolved file.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    path: VirtualPath,
    content: FileContent,
}

impl File {
    pub(crate) fn new(path: VirtualPath, content: FileContent) -> Self {
        Self { path, content }
    }

    pub fn path(&self) -> &VirtualPath {
        &self.path
    }

    pub fn content(&self) -> &FileContent {
        &self.content
    }

    /// Scalars render as text; records as a header line plus one row.
    pub fn render(&self, pretty: bool) -> VfsResult<String> {
        match &self.content {
            FileContent::Scalar(value) => render::render_value(value, pretty),
            FileContent::Record { headers, record } => {
                render::render_table(headers, std::iter::once(record))
            }
        }
    }
}
