//! The filesystem facade.
//!
//! A [`VirtualFilesystem`] owns exactly one [`Snapshot`]: a loaded source
//! projected through its backend. Queries take raw path strings, normalize
//! them, and delegate to the snapshot. Reloading swaps in a new snapshot
//! wholesale; anyone holding the old `Arc<Snapshot>` keeps an intact view.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::VfsConfig;
use crate::load::{self, LoadedSource, SourceFormat, TabularData};
use crate::record::Record;
use crate::value::Value;

use super::backends::{RecordIndex, TabularBackend, TreeBackend};
use super::error::{LoadError, VfsError, VfsResult};
use super::ops::{SourceOps, SourceShape};
use super::path::VirtualPath;
use super::types::{DirEntry, EntryInfo, VirtualEntry};

/// One immutable, loaded namespace.
#[derive(Debug)]
pub struct Snapshot {
    source: Box<dyn SourceOps>,
    pretty: bool,
    load_error: Option<LoadError>,
}

impl Snapshot {
    fn build(loaded: LoadedSource, config: &VfsConfig) -> VfsResult<Self> {
        let source: Box<dyn SourceOps> = match loaded {
            LoadedSource::Tabular(TabularData { headers, records }) => {
                Box::new(TabularBackend::new(RecordIndex::build(headers, records, config)?))
            }
            LoadedSource::Tree(root) => Box::new(TreeBackend::new(root)),
        };
        Ok(Self {
            source,
            pretty: config.pretty,
            load_error: None,
        })
    }

    pub fn shape(&self) -> SourceShape {
        self.source.shape()
    }

    /// The backend serving this snapshot.
    pub fn source(&self) -> &dyn SourceOps {
        self.source.as_ref()
    }

    /// The load failure absorbed into this (then empty) snapshot, if any.
    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn list(&self, path: &str) -> VfsResult<Vec<String>> {
        self.source.list(&VirtualPath::normalize(path)?)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn read_dir(&self, path: &str) -> VfsResult<Vec<DirEntry>> {
        self.source.read_dir(&VirtualPath::normalize(path)?)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn resolve(&self, path: &str) -> VfsResult<VirtualEntry> {
        self.source.resolve(&VirtualPath::normalize(path)?)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn read(&self, path: &str) -> VfsResult<String> {
        self.source.read(&VirtualPath::normalize(path)?, self.pretty)
    }

    pub fn stat(&self, path: &str) -> VfsResult<EntryInfo> {
        self.source.stat(&VirtualPath::normalize(path)?, self.pretty)
    }

    pub fn exists(&self, path: &str) -> bool {
        VirtualPath::normalize(path)
            .map(|p| self.source.exists(&p))
            .unwrap_or(false)
    }
}

/// Read-only virtual filesystem over one loaded source.
#[derive(Debug)]
pub struct VirtualFilesystem {
    snapshot: Arc<Snapshot>,
    config: VfsConfig,
    /// Source file, for filesystems opened from disk.
    origin: Option<PathBuf>,
}

impl VirtualFilesystem {
    /// Flat namespace over in-memory records.
    pub fn from_records(
        headers: Vec<String>,
        records: Vec<Record>,
        config: &VfsConfig,
    ) -> VfsResult<Self> {
        Self::from_loaded(
            LoadedSource::Tabular(TabularData { headers, records }),
            config,
        )
    }

    /// Nested namespace over an in-memory value tree.
    pub fn from_value(root: Value, config: &VfsConfig) -> Self {
        Self {
            snapshot: Arc::new(Snapshot {
                source: Box::new(TreeBackend::new(root)),
                pretty: config.pretty,
                load_error: None,
            }),
            config: config.clone(),
            origin: None,
        }
    }

    pub fn from_loaded(loaded: LoadedSource, config: &VfsConfig) -> VfsResult<Self> {
        Ok(Self {
            snapshot: Arc::new(Snapshot::build(loaded, config)?),
            config: config.clone(),
            origin: None,
        })
    }

    /// Open a source file, serving an empty namespace if it cannot be loaded.
    ///
    /// Load failures are logged and kept as the snapshot's
    /// [`load_error`](Snapshot::load_error). Naming-policy violations
    /// (`MissingKey`, `DuplicateKey` under `reject`) are returned.
    pub fn open(path: impl AsRef<Path>, config: &VfsConfig) -> VfsResult<Self> {
        let path = path.as_ref();
        Ok(Self {
            snapshot: Arc::new(Self::load_soft(path, config)?),
            config: config.clone(),
            origin: Some(path.to_path_buf()),
        })
    }

    /// Open a source file, failing on any load error.
    pub fn try_open(path: impl AsRef<Path>, config: &VfsConfig) -> VfsResult<Self> {
        let path = path.as_ref();
        let loaded = load::load_path(path, config.format)?;
        Ok(Self {
            snapshot: Arc::new(Snapshot::build(loaded, config)?),
            config: config.clone(),
            origin: Some(path.to_path_buf()),
        })
    }

    fn load_soft(path: &Path, config: &VfsConfig) -> VfsResult<Snapshot> {
        match load::load_path(path, config.format) {
            Ok(loaded) => Snapshot::build(loaded, config),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "source load failed, serving empty namespace"
                );
                let format = config.format.or_else(|| SourceFormat::detect(path).ok());
                let mut snapshot = Snapshot::build(LoadedSource::empty(format), config)?;
                snapshot.load_error = Some(e);
                Ok(snapshot)
            }
        }
    }

    /// Re-run the load step and replace the snapshot.
    ///
    /// Fails for filesystems not opened from a file. On error the current
    /// snapshot stays in place.
    #[tracing::instrument(level = "debug", skip(self), fields(origin = ?self.origin))]
    pub fn reload(&mut self) -> VfsResult<()> {
        let Some(path) = &self.origin else {
            return Err(VfsError::other("filesystem was not opened from a file"));
        };
        let snapshot = Self::load_soft(path, &self.config)?;
        self.snapshot = Arc::new(snapshot);
        Ok(())
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn config(&self) -> &VfsConfig {
        &self.config
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn shape(&self) -> SourceShape {
        self.snapshot.shape()
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        self.snapshot.load_error()
    }

    /// Child names at `path`.
    ///
    /// Tree sources list absolute child paths, directories marked with a
    /// trailing `/`. Tabular sources ignore `path` and list every record
    /// name.
    pub fn list(&self, path: &str) -> VfsResult<Vec<String>> {
        self.snapshot.list(path)
    }

    /// Immediate children at `path` with their kinds.
    pub fn read_dir(&self, path: &str) -> VfsResult<Vec<DirEntry>> {
        self.snapshot.read_dir(path)
    }

    /// Classify the node at `path` as a directory or a file.
    pub fn resolve(&self, path: &str) -> VfsResult<VirtualEntry> {
        self.snapshot.resolve(path)
    }

    /// Render the content at `path`. Directories render their whole subtree.
    pub fn read(&self, path: &str) -> VfsResult<String> {
        self.snapshot.read(path)
    }

    pub fn stat(&self, path: &str) -> VfsResult<EntryInfo> {
        self.snapshot.stat(path)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.snapshot.exists(path)
    }
}
