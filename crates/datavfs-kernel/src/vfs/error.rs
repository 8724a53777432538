//! VFS error types.

use std::io;
use thiserror::Error;

/// Failure of a source load collaborator.
///
/// Soft-loading entry points absorb these into an empty namespace; the
/// strict ones surface them wrapped in [`VfsError::Load`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed delimited input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML document.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Delimited input without a header line.
    #[error("missing header line")]
    MissingHeader,

    /// No loader for this source.
    #[error("unsupported source format: {0}")]
    UnsupportedFormat(String),
}

/// VFS error type.
#[derive(Debug, Error)]
pub enum VfsError {
    /// Malformed raw path string.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Path has no corresponding node or record.
    #[error("not found: {0}")]
    NotFound(String),

    /// Listing attempted on a file.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Record lacks its naming field (reject policy).
    #[error("record {row} has no `{field}` field")]
    MissingKey {
        /// The configured naming field.
        field: String,
        /// Zero-based position of the record in load order.
        row: usize,
    },

    /// Two records derive the same name (reject policy).
    #[error("duplicate record name: {0}")]
    DuplicateKey(String),

    /// Source load failed.
    #[error("load failed: {0}")]
    Load(#[from] LoadError),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl VfsError {
    /// Create an InvalidPath error.
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }

    /// Create a NotFound error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    /// Create a NotADirectory error.
    pub fn not_a_directory(path: impl Into<String>) -> Self {
        Self::NotADirectory(path.into())
    }

    /// Create a MissingKey error.
    pub fn missing_key(field: impl Into<String>, row: usize) -> Self {
        Self::MissingKey {
            field: field.into(),
            row,
        }
    }

    /// Create a DuplicateKey error.
    pub fn duplicate_key(name: impl Into<String>) -> Self {
        Self::DuplicateKey(name.into())
    }

    /// Create an Other error.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// True for [`VfsError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Convert VfsError to std::io::Error for compatibility.
impl From<VfsError> for io::Error {
    fn from(e: VfsError) -> Self {
        match e {
            VfsError::InvalidPath(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            VfsError::NotFound(msg) => io::Error::new(io::ErrorKind::NotFound, msg),
            VfsError::NotADirectory(msg) => io::Error::new(io::ErrorKind::NotADirectory, msg),
            e @ VfsError::MissingKey { .. } => {
                io::Error::new(io::ErrorKind::InvalidData, e.to_string())
            }
            VfsError::DuplicateKey(msg) => io::Error::new(io::ErrorKind::InvalidData, msg),
            VfsError::Load(LoadError::Io(e)) => e,
            VfsError::Load(e) => io::Error::new(io::ErrorKind::InvalidData, e.to_string()),
            VfsError::Other(msg) => io::Error::other(msg),
        }
    }
}

/// VFS result type.
pub type VfsResult<T> = Result<T, VfsError>;
