//! Path grammar.
//!
//! A [`VirtualPath`] is an absolute, `/`-separated sequence of non-empty
//! segments. Leading, trailing and repeated slashes are insignificant, so
//! `"/a//b/"` and `"a/b"` are the same path. Segments are matched literally:
//! `.` and `..` carry no special meaning.

use std::fmt;
use std::str::FromStr;

use super::error::{VfsError, VfsResult};

/// Path separator.
pub const SEPARATOR: char = '/';

/// A normalized virtual path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct VirtualPath {
    segments: Vec<String>,
}

impl VirtualPath {
    /// The namespace root, `/`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Normalize a raw path string.
    ///
    /// Splits on `/` and drops empty segments. Fails with `InvalidPath`
    /// for strings containing NUL.
    pub fn normalize(raw: &str) -> VfsResult<Self> {
        Self::from_segments(raw.split(SEPARATOR).filter(|s| !s.is_empty()))
    }

    /// Build a path from already-split segments.
    ///
    /// Every segment must be non-empty and free of separators.
    pub fn from_segments<I, S>(segments: I) -> VfsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments
            .into_iter()
            .map(|s| {
                let s = s.into();
                Self::check_segment(&s)?;
                Ok(s)
            })
            .collect::<VfsResult<Vec<_>>>()?;
        Ok(Self { segments })
    }

    /// True when `segment` can appear in a path: non-empty, no separator,
    /// no NUL.
    pub fn is_valid_segment(segment: &str) -> bool {
        Self::check_segment(segment).is_ok()
    }

    fn check_segment(segment: &str) -> VfsResult<()> {
        if segment.is_empty() {
            return Err(VfsError::invalid_path("empty path segment"));
        }
        if segment.contains(SEPARATOR) {
            return Err(VfsError::invalid_path(format!(
                "segment contains separator: {segment}"
            )));
        }
        if segment.contains('\0') {
            return Err(VfsError::invalid_path(format!(
                "segment contains NUL: {}",
                segment.escape_debug()
            )));
        }
        Ok(())
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Last segment, `None` at the root.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Parent path, `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.segments.split_last()?;
        Some(Self {
            segments: parent.to_vec(),
        })
    }

    /// Append a raw relative path (which may carry a trailing `/`).
    pub fn join(&self, raw: &str) -> VfsResult<Self> {
        let tail = Self::normalize(raw)?;
        let mut segments = self.segments.clone();
        segments.extend(tail.segments);
        Ok(Self { segments })
    }

    /// Prefix under which child names of this directory are displayed:
    /// `/` for the root, `/a/b/` otherwise.
    pub fn dir_prefix(&self) -> String {
        if self.is_root() {
            SEPARATOR.to_string()
        } else {
            format!("{self}{SEPARATOR}")
        }
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "{SEPARATOR}");
        }
        for segment in &self.segments {
            write!(f, "{SEPARATOR}{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for VirtualPath {
    type Err = VfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}
