use crate::{context_path::ContextPath, scan::scan};
use indexmap::IndexMap;
use serde_json::Value;

/// A filter on a path segment at a relative offset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PathFilter<'a> {
    offset: isize,
    marker: &'a str,
}

impl<'a> PathFilter<'a> {
    /// Creates a path filter.
    ///
    /// A negative offset counts from the end of a path.
    pub const fn new(offset: isize, marker: &'a str) -> Self {
        Self { offset, marker }
    }

    /// Returns `true` if a path satisfies the filter.
    pub fn matches(&self, path: &ContextPath) -> bool {
        path.segment(self.offset)
            .is_some_and(|segment| segment.matches_marker(self.marker))
    }
}

/// Extracts matches of a target keyed by their truncated paths.
///
/// Later matches overwrite earlier ones with the same key.
pub fn extract_paths<'a>(
    tree: &'a Value,
    target: &str,
    path_offset: isize,
    filter: Option<PathFilter<'_>>,
) -> IndexMap<ContextPath, &'a Value> {
    scan(tree, Some(target))
        .into_iter()
        .filter(|found| filter.is_none_or(|filter| filter.matches(found.path())))
        .map(|found| (found.path().truncate(path_offset), found.value()))
        .collect()
}
