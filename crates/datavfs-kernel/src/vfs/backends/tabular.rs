//! Flat namespace over a record list.
//!
//! Every record is one file named `item_<id>.csv` at the root; there are
//! no subdirectories.

use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::config::{DuplicateIdPolicy, VfsConfig};
use crate::record::Record;
use crate::vfs::error::{VfsError, VfsResult};
use crate::vfs::naming;
use crate::vfs::ops::{SourceOps, SourceShape};
use crate::vfs::path::VirtualPath;
use crate::vfs::types::{
    DirEntry, Directory, DirectoryNode, File, FileContent, VirtualEntry,
};

/// Derived name → record, in load order.
///
/// A later record with an already-indexed name replaces the earlier one
/// but keeps its position (last write wins, first position stays).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordIndex {
    headers: Arc<[String]>,
    entries: IndexMap<String, Record>,
}

impl RecordIndex {
    /// Index `records` under the configured naming policies.
    ///
    /// When `headers` is empty the header order is taken from the records,
    /// first occurrence first.
    pub fn build(
        headers: Vec<String>,
        records: impl IntoIterator<Item = Record>,
        config: &VfsConfig,
    ) -> VfsResult<Self> {
        let mut headers = headers;
        let derive_headers = headers.is_empty();
        let mut entries: IndexMap<String, Record> = IndexMap::new();

        for (row, record) in records.into_iter().enumerate() {
            if derive_headers {
                for field in record.field_names() {
                    if !headers.iter().any(|h| h == field) {
                        headers.push(field.to_string());
                    }
                }
            }
            let Some(name) = naming::derive_record_name(&record, row, config)? else {
                continue;
            };
            match entries.entry(name) {
                Entry::Occupied(mut slot) => match config.duplicate_id {
                    DuplicateIdPolicy::LastWriteWins => {
                        tracing::warn!(name = %slot.key(), row, "duplicate record name, replacing");
                        slot.insert(record);
                    }
                    DuplicateIdPolicy::Reject => {
                        return Err(VfsError::duplicate_key(slot.key().clone()));
                    }
                },
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
            }
        }

        Ok(Self {
            headers: headers.into(),
            entries,
        })
    }

    /// Record named `name`.
    pub fn lookup(&self, name: &str) -> VfsResult<&Record> {
        self.entries
            .get(name)
            .ok_or_else(|| VfsError::not_found(name))
    }

    /// Names in load order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Names in load order, owned.
    pub fn list(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.values()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub(crate) fn shared_headers(&self) -> Arc<[String]> {
        Arc::clone(&self.headers)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Source backend for tabular data.
#[derive(Debug, Clone, Default)]
pub struct TabularBackend {
    index: Arc<RecordIndex>,
}

impl TabularBackend {
    pub fn new(index: RecordIndex) -> Self {
        Self {
            index: Arc::new(index),
        }
    }
}

impl SourceOps for TabularBackend {
    fn shape(&self) -> SourceShape {
        SourceShape::Tabular
    }

    /// The namespace is flat: every path lists the root.
    fn list(&self, _path: &VirtualPath) -> VfsResult<Vec<String>> {
        Ok(self.index.list())
    }

    fn read_dir(&self, path: &VirtualPath) -> VfsResult<Vec<DirEntry>> {
        match path.segments() {
            [] => Ok(self.index.names().map(DirEntry::file).collect()),
            [name] if self.index.lookup(name).is_ok() => {
                Err(VfsError::not_a_directory(path.to_string()))
            }
            _ => Err(VfsError::not_found(path.to_string())),
        }
    }

    fn resolve(&self, path: &VirtualPath) -> VfsResult<VirtualEntry> {
        match path.segments() {
            [] => Ok(VirtualEntry::Directory(Directory::new(
                path.clone(),
                DirectoryNode::Table(Arc::clone(&self.index)),
            ))),
            [name] => {
                let record = self
                    .index
                    .lookup(name)
                    .map_err(|_| VfsError::not_found(path.to_string()))?;
                Ok(VirtualEntry::File(File::new(
                    path.clone(),
                    FileContent::Record {
                        headers: self.index.shared_headers(),
                        record: record.clone(),
                    },
                )))
            }
            _ => Err(VfsError::not_found(path.to_string())),
        }
    }
}
