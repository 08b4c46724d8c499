//! Selection of the files to generate

use crate::descriptor::{SchemaFile, SchemaSet};
use crate::error::{GenerateError, GenerateResult};
use std::collections::HashSet;
use tracing::debug;

/// Pick the files named in `entry_names`, in request order, without duplicates.
///
/// Imports that were not requested are left out; they stay reachable through
/// the set's [`TypeIndex`](crate::TypeIndex) for type resolution. Every name
/// without a loaded file is reported in a single
/// [`GenerateError::UnknownEntryFiles`].
pub fn select_files<'a, S: AsRef<str>>(
    entry_names: &[S],
    set: &'a SchemaSet,
) -> GenerateResult<Vec<&'a SchemaFile>> {
    let mut seen = HashSet::new();
    let mut selected = Vec::with_capacity(entry_names.len());
    let mut missing = Vec::new();

    for name in entry_names.iter().map(AsRef::as_ref) {
        if !seen.insert(name) {
            continue;
        }
        match set.file(name) {
            Some(file) => selected.push(file),
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(GenerateError::UnknownEntryFiles(missing));
    }

    debug!(
        requested = entry_names.len(),
        selected = selected.len(),
        "selected files to generate"
    );
    Ok(selected)
}

#[cfg(test)]
#[path = "selector/selector_tests.rs"]
mod selector_tests;
