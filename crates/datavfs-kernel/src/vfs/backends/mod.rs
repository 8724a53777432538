//! VFS backends.
//!
//! Backends implement [`SourceOps`](super::SourceOps) for each source shape.

mod tabular;
mod tree;

pub use tabular::{RecordIndex, TabularBackend};
pub use tree::TreeBackend;
