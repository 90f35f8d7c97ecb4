//! Pure helpers over project-relative paths.
//!
//! Paths are split on both `/` and `\`; the canonical form joins segments
//! with [`SEPARATOR`].

/// Top-level directory holding the project's own assets.
pub const PROJECT_ROOT: &str = "Assets";

/// Top-level directory of vendored packages; never checked.
pub const PACKAGES_ROOT: &str = "Packages";

/// Canonical separator for display and comparison.
pub const SEPARATOR: char = '/';

/// Separator between alternative root-folder names.
pub const ROOT_FOLDER_SEPARATOR: char = '|';

/// Splits a path on both separator styles, dropping empty segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split(|c: char| c == '/' || c == '\\')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Joins segments with the canonical separator.
pub fn join_segments(segments: &[&str]) -> String {
    segments.join(&SEPARATOR.to_string())
}

/// Canonicalizes separators, dropping empty and trailing segments.
pub fn normalize_separators(path: &str) -> String {
    join_segments(&split_path(path))
}

/// Folder path of the last segment, starting at the first [`PROJECT_ROOT`]
/// segment.
///
/// When no parent segment is the project root the whole parent path is
/// returned, so inventories with root-relative paths still report a folder.
pub fn join_project_relative(segments: &[&str]) -> String {
    let parents = match segments.split_last() {
        Some((_, parents)) => parents,
        None => return String::new(),
    };
    let start = parents
        .iter()
        .position(|segment| *segment == PROJECT_ROOT)
        .unwrap_or(0);
    join_segments(&parents[start..])
}

/// Last segment of the path, or an empty string for an empty path.
pub fn file_name<'a>(segments: &[&'a str]) -> &'a str {
    segments.last().copied().unwrap_or("")
}

/// True if any non-empty ignore entry equals one of the segments exactly.
pub fn is_ignored(segments: &[&str], ignore_folders: &[String]) -> bool {
    ignore_folders
        .iter()
        .filter(|entry| !entry.is_empty())
        .any(|entry| segments.iter().any(|segment| *segment == entry.as_str()))
}

/// True if the path lives under the vendored packages root.
pub fn is_in_packages(segments: &[&str]) -> bool {
    segments.first() == Some(&PACKAGES_ROOT)
}

/// Prefixes a user-authored path with the project root.
pub fn project_path(relative: &str) -> String {
    let mut segments = vec![PROJECT_ROOT];
    segments.extend(split_path(relative));
    join_segments(&segments)
}

/// Splits a `|`-separated list of accepted root-folder names.
pub fn split_root_folders(roots: &str) -> Vec<&str> {
    roots
        .split(ROOT_FOLDER_SEPARATOR)
        .filter(|root| !root.is_empty())
        .collect()
}
