//! Path model.
//!
//! Project paths are plain `/`-separated strings relative to the project root.
//!
//! # Path Convention
//!
//! - Root: empty string `""`
//! - File: `"main.js"`, `"src/app.js"` (no trailing slash)
//! - Folder: `"src/"`, `"src/lib/"` (always a trailing slash)
//! - No leading slash, no empty segments
//!
//! Every cascading operation is built on [`is_descendant_of`], which only
//! matches at segment boundaries so that `"src/"` never matches
//! `"src2/main.js"`.

use unicode_normalization::UnicodeNormalization;

use crate::error::VfsError;

/// Path separator.
pub const SEPARATOR: char = '/';

/// Kind of entry a path denotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    /// Classify a path by its trailing separator.
    pub fn of(path: &str) -> Self {
        if is_folder(path) {
            Self::Folder
        } else {
            Self::File
        }
    }
}

/// True iff `path` ends with the separator.
#[inline]
pub fn is_folder(path: &str) -> bool {
    path.ends_with(SEPARATOR)
}

/// Non-empty components of `path`, in order.
pub fn segments(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// Last segment of `path` (without trailing separator).
///
/// Returns an empty string for the root.
pub fn name(path: &str) -> &str {
    path.trim_end_matches(SEPARATOR)
        .rsplit(SEPARATOR)
        .next()
        .unwrap_or_default()
}

/// Folder containing `path`, in folder form, or `""` at root.
///
/// - `"src/a.js"` -> `"src/"`
/// - `"src/lib/"` -> `"src/"`
/// - `"a.js"` -> `""`
pub fn parent_folder(path: &str) -> String {
    let trimmed = path.trim_end_matches(SEPARATOR);
    match trimmed.rfind(SEPARATOR) {
        Some(idx) => trimmed[..=idx].to_string(),
        None => String::new(),
    }
}

/// Folder form of `path` (appends the separator if missing).
///
/// The root stays `""`.
pub fn as_folder(path: &str) -> String {
    if path.is_empty() || is_folder(path) {
        path.to_string()
    } else {
        format!("{}{}", path, SEPARATOR)
    }
}

/// File form of `path` (strips trailing separators).
pub fn as_file(path: &str) -> &str {
    path.trim_end_matches(SEPARATOR)
}

/// The same logical node in the opposite form (`"a"` <-> `"a/"`).
pub fn twin(path: &str) -> String {
    if is_folder(path) {
        as_file(path).to_string()
    } else {
        as_folder(path)
    }
}

/// Folder that new entries go into when `selected` is the current selection.
///
/// A folder is its own target; a file targets its parent; no selection
/// targets the root.
pub fn enclosing_folder(selected: Option<&str>) -> String {
    match selected {
        Some(folder) if is_folder(folder) => folder.to_string(),
        Some(file) => parent_folder(file),
        None => String::new(),
    }
}

/// Join a child name onto a parent folder.
///
/// `parent` may be given with or without its trailing separator.
pub fn join(parent: &str, name: &str) -> String {
    format!("{}{}", as_folder(parent), name)
}

/// True iff `path` is `ancestor` itself or lies underneath it.
///
/// Only a folder (trailing separator) has descendants, and the prefix test
/// includes that separator, so `"abc/file"` is not under `"ab/"`. A file
/// path only matches itself. Everything is under the root `""`.
pub fn is_descendant_of(path: &str, ancestor: &str) -> bool {
    if ancestor.is_empty() || path == ancestor {
        return true;
    }
    if !is_folder(ancestor) {
        // A file has no descendants, only itself.
        return false;
    }
    path.starts_with(ancestor)
}

/// Every proper ancestor folder of `path`, outermost first.
///
/// `"a/b/c.js"` -> `["a/", "a/b/"]`
pub fn ancestors(path: &str) -> Vec<String> {
    let parts = segments(path);
    let mut out = Vec::with_capacity(parts.len().saturating_sub(1));
    let mut current = String::new();
    for part in parts.iter().take(parts.len().saturating_sub(1)) {
        current.push_str(part);
        current.push(SEPARATOR);
        out.push(current.clone());
    }
    out
}

/// Replace the `old` prefix of `path` with `new`, keeping the suffix.
///
/// Returns `None` if `path` is not under `old`.
pub fn rebase(path: &str, old: &str, new: &str) -> Option<String> {
    if !is_descendant_of(path, old) {
        return None;
    }
    Some(format!("{}{}", new, &path[old.len()..]))
}

/// Validate a single-segment name and normalize it to NFC.
///
/// Names come from user prompts and from the host file picker, which may
/// hand over decomposed Unicode; normalizing keeps `é` and `e\u{301}` from
/// becoming two different entries.
pub fn validate_name(name: &str) -> Result<String, VfsError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." || trimmed.contains(SEPARATOR) {
        return Err(VfsError::InvalidName(name.to_string()));
    }
    Ok(trimmed.nfc().collect())
}

/// Validate a full path: no leading separator, no empty or dot segments.
///
/// Returns the path with every segment NFC-normalized.
pub fn validate_path(path: &str) -> Result<String, VfsError> {
    let body = as_file(path);
    if body.is_empty() {
        return Err(VfsError::InvalidName(path.to_string()));
    }

    let mut out = String::with_capacity(path.len());
    for (i, part) in body.split(SEPARATOR).enumerate() {
        if part.is_empty() || part == "." || part == ".." {
            return Err(VfsError::InvalidName(path.to_string()));
        }
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.extend(part.nfc());
    }
    if is_folder(path) {
        out.push(SEPARATOR);
    }
    Ok(out)
}
