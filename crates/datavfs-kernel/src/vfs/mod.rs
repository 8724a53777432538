//! Virtual Filesystem projection.
//!
//! This module maps loaded data onto a read-only, path-addressable
//! namespace. Key components:
//!
//! - [`VirtualPath`] - Path grammar and normalization
//! - [`naming`] - Derived file and directory names
//! - [`resolver`] - Segment-by-segment tree walk
//! - [`RecordIndex`] - Name → record lookup for tabular sources
//! - [`SourceOps`] - Core trait implemented by each backend
//! - [`VirtualFilesystem`] - Facade owning one loaded snapshot
//!
//! ## Design Decisions
//!
//! - **Path-based, no handles**: every query is a pure function of
//!   (snapshot, path); nothing is opened or closed.
//! - **Explicit classification**: file vs. directory comes from the node's
//!   shape, never from probing for errors.
//! - **Snapshots, not mutation**: a reload builds a new snapshot; entries
//!   resolved earlier keep reading the old one.

pub mod backends;
mod error;
mod filesystem;
pub mod naming;
mod ops;
mod path;
mod render;
pub mod resolver;
mod types;

pub use backends::{RecordIndex, TabularBackend, TreeBackend};
pub use error::{LoadError, VfsError, VfsResult};
pub use filesystem::{Snapshot, VirtualFilesystem};
pub use ops::{SourceOps, SourceShape};
pub use path::{SEPARATOR, VirtualPath};
pub use types::{DirEntry, Directory, EntryInfo, File, FileContent, FileType, VirtualEntry};
