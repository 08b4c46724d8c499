//! Ruby module paths for schema files

use crate::descriptor::SchemaFile;
use crate::naming::to_camel;
use std::fmt;
use tracing::{debug, warn};

/// Separator between Ruby namespace segments
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Ordered Ruby module segments a file's constants live under.
///
/// Segments are never empty strings. The path itself is empty only for a file
/// with neither a package nor a namespace override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NamespacePath {
    segments: Vec<String>,
}

impl NamespacePath {
    /// Create a path from segments, dropping any empty ones
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.is_empty())
                .collect(),
        }
    }

    /// The empty (top-level) namespace
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.segments.iter()
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(NAMESPACE_SEPARATOR))
    }
}

impl<'a> IntoIterator for &'a NamespacePath {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Compute the Ruby namespace for a schema file.
///
/// A well-formed namespace override wins and is used verbatim. Otherwise the
/// package is split on `.` and each piece is camelized.
pub fn namespace_for(file: &SchemaFile) -> NamespacePath {
    if let Some(raw) = file.namespace_override.as_deref() {
        match parse_override(raw) {
            Some(path) => {
                debug!(file = %file.name, namespace = %path, "using namespace override");
                return path;
            }
            None if raw.trim().is_empty() => {}
            None => {
                warn!(
                    file = %file.name,
                    value = raw,
                    "ignoring malformed namespace override, falling back to package"
                );
            }
        }
    }

    NamespacePath::new(split_constants(&file.package))
}

/// Split a dotted protobuf package into Ruby constant names.
///
/// # Examples
///
/// ```
/// use twirp_ruby_codegen::split_constants;
///
/// assert_eq!(split_constants("example.hello_world"), vec!["Example", "HelloWorld"]);
/// assert_eq!(split_constants("p99.a2z"), vec!["P99", "A2z"]);
/// assert!(split_constants("").is_empty());
/// ```
pub fn split_constants(package: &str) -> Vec<String> {
    if package.is_empty() {
        return Vec::new();
    }
    package.split('.').map(to_camel).collect()
}

/// Parse an override value, returning `None` when it is absent or malformed.
fn parse_override(raw: &str) -> Option<NamespacePath> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let pieces: Vec<&str> = value.split(NAMESPACE_SEPARATOR).collect();
    let well_formed = pieces
        .iter()
        .all(|p| !p.is_empty() && !p.chars().any(char::is_whitespace));
    if !well_formed {
        return None;
    }

    Some(NamespacePath {
        segments: pieces.into_iter().map(str::to_string).collect(),
    })
}
