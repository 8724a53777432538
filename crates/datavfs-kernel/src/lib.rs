//! # datavfs-kernel
//!
//! Read-only virtual filesystem over semi-structured data.
//!
//! A loaded source is projected onto a namespace of directories and files:
//!
//! - **Tabular** (CSV): every record is one file, `item_<id>.csv`, at the
//!   root. Reading it yields a header line and that record's row.
//! - **Hierarchical** (JSON, TOML): mappings and sequences are directories,
//!   scalars are files. Sequence elements are named `item_<index>`.
//!
//! ```text
//! {"app_settings": {"version": "1.2.0"}, "users": [{"id": "u1"}]}
//!
//! /
//! ├── app_settings/
//! │   └── version          → "1.2.0"
//! └── users/
//!     └── item_0/
//!         └── id           → "u1"
//! ```
//!
//! The entry point is [`VirtualFilesystem`]; see [`VfsConfig`] for naming
//! policies.

pub mod config;
pub mod load;
pub mod record;
pub mod value;
pub mod vfs;

pub use config::{ConfigError, DuplicateIdPolicy, MissingIdPolicy, VfsConfig};
pub use load::{LoadedSource, SourceFormat, TabularData};
pub use record::Record;
pub use value::Value;
pub use vfs::{
    DirEntry, EntryInfo, FileContent, FileType, LoadError, RecordIndex, Snapshot, SourceOps,
    SourceShape, VfsError, VfsResult, VirtualEntry, VirtualFilesystem, VirtualPath,
};
