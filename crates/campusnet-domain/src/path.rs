//! Tree-path addressing for the backing document store.
//!
//! Documents live in a tree addressed by slash-delimited paths such as
//! `Relationships/{owner}/{other}`. Paths are validated by segment, not by
//! consulting any tree structure.

use std::fmt;

/// Address of a document in the store
///
/// A non-empty sequence of non-empty segments. Segments must not contain `/`
/// or control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreePath(Vec<String>);

/// Error raised for malformed paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError(pub String);

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid path: {}", self.0)
    }
}

impl std::error::Error for PathError {}

impl TreePath {
    /// Build a path from segments
    ///
    /// # Errors
    /// Returns an error if there are no segments or any segment is invalid.
    pub fn new<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(PathError("path cannot be empty".to_string()));
        }
        for segment in &segments {
            validate_segment(segment)?;
        }
        Ok(Self(segments))
    }

    /// Parse a slash-delimited path string
    pub fn parse(s: &str) -> Result<Self, PathError> {
        Self::new(s.split('/'))
    }

    /// Extend the path with one more segment
    pub fn child<S: Into<String>>(&self, segment: S) -> Result<Self, PathError> {
        let segment = segment.into();
        validate_segment(&segment)?;
        let mut segments = self.0.clone();
        segments.push(segment);
        Ok(Self(segments))
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The path's segments
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Final segment
    pub fn leaf(&self) -> &str {
        // Invariant: paths are never empty
        self.0.last().map(String::as_str).unwrap_or("")
    }

    /// Whether `self` is `other` or an ancestor of `other`
    pub fn contains(&self, other: &TreePath) -> bool {
        other.0.len() >= self.0.len() && other.0[..self.0.len()] == self.0[..]
    }
}

fn validate_segment(segment: &str) -> Result<(), PathError> {
    if segment.is_empty() {
        return Err(PathError("segment cannot be empty".to_string()));
    }
    if segment.contains('/') {
        return Err(PathError(format!("segment '{}' contains '/'", segment)));
    }
    if segment.chars().any(char::is_control) {
        return Err(PathError("segment contains control characters".to_string()));
    }
    Ok(())
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}
