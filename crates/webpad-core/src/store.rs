//! Flat project store.
//!
//! [`ProjectStore`] is the single source of truth: a sorted map from full
//! path to text content. Hierarchy is never stored; folders exist either
//! implicitly (as the prefix of some key) or as an explicit marker entry
//! `"<folder>/" -> ""` so that empty folders survive a save/load cycle.

use std::collections::BTreeMap;
use std::ops::Bound;

use serde::{Deserialize, Serialize};

use crate::path;

/// Path -> content mapping for a whole project.
///
/// Serializes as a plain JSON object, which is also the record format kept
/// in IndexedDB.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectStore {
    entries: BTreeMap<String, String>,
}

impl ProjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True iff `path` is an explicit key.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Content of an explicit key.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Insert or overwrite an entry, returning the previous content.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) -> Option<String> {
        self.entries.insert(path.into(), content.into())
    }

    /// Remove an explicit key.
    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.entries.remove(path)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys that are `ancestor` itself or lie underneath it.
    pub fn keys_under<'a>(&'a self, ancestor: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        // Keys under a folder are contiguous in sort order starting at the
        // folder prefix itself.
        self.entries
            .range::<str, _>((Bound::Included(ancestor), Bound::Unbounded))
            .map(|(k, _)| k.as_str())
            .take_while(move |k| k.starts_with(ancestor))
            .filter(move |k| path::is_descendant_of(k, ancestor))
    }

    /// True iff `folder` exists, explicitly or implied by a descendant key.
    ///
    /// The root always exists.
    pub fn folder_exists(&self, folder: &str) -> bool {
        if folder.is_empty() {
            return true;
        }
        let folder = path::as_folder(folder);
        self.keys_under(&folder).next().is_some()
    }

    /// True iff `path` names an existing entry of its own kind.
    ///
    /// Files must be explicit keys; folders may be implied.
    pub fn exists(&self, path: &str) -> bool {
        if path::is_folder(path) {
            self.folder_exists(path)
        } else {
            self.contains(path)
        }
    }

    /// True iff `path` or its file/folder twin is taken.
    pub fn is_occupied(&self, path: &str) -> bool {
        let file = path::as_file(path);
        self.contains(file) || self.folder_exists(&path::as_folder(file))
    }

    /// First file key (not a folder marker) in sorted order.
    pub fn first_file(&self) -> Option<&str> {
        self.keys().find(|k| !path::is_folder(k))
    }

    /// Number of file entries (folder markers excluded).
    pub fn file_count(&self) -> usize {
        self.keys().filter(|k| !path::is_folder(k)).count()
    }
}

impl FromIterator<(String, String)> for ProjectStore {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ProjectStore {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
