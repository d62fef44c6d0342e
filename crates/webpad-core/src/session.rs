//! Mutation engine.
//!
//! A [`Session`] owns the [`ProjectStore`] and the active path. All changes
//! to either go through its methods (or [`Session::dispatch`]); each method
//! validates first and only then touches the store, so a returned error
//! always means nothing changed.
//!
//! Persistence is not handled here: the caller persists after a successful
//! mutation (see [`Project`](crate::Project)).

use tracing::debug;

use crate::command::{Command, CommandResult, EditorUpdate, EditorView};
use crate::error::VfsError;
use crate::path;
use crate::store::ProjectStore;
use crate::tree::{self, TreeNode};

/// The project being edited plus the currently selected entry.
#[derive(Clone, Debug, Default)]
pub struct Session {
    store: ProjectStore,
    active: Option<String>,
}

impl Session {
    /// Empty session, nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session over an existing store; the first file becomes active.
    pub fn with_store(store: ProjectStore) -> Self {
        let mut session = Self::new();
        session.replace_store(store);
        session
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn active_path(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Build the explorer tree for the current key set.
    pub fn tree(&self) -> TreeNode {
        tree::build_tree(self.store.keys())
    }

    /// Editor contents for the active entry, if it is a file.
    pub fn editor_view(&self) -> Option<EditorView> {
        let active = self.active.as_deref()?;
        if path::is_folder(active) {
            return None;
        }
        let content = self.store.get(active)?;
        Some(EditorView::new(active, content))
    }

    /// Swap in a whole new store. The first file becomes active.
    pub fn replace_store(&mut self, store: ProjectStore) {
        self.active = store.first_file().map(str::to_string);
        self.store = store;
    }

    /// Drop everything.
    pub fn reset(&mut self) {
        self.store.clear();
        self.active = None;
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Create an empty file `parent + name` and make it active.
    ///
    /// Missing parent folders are implied by the new key.
    pub fn create_file(&mut self, parent: &str, name: &str) -> Result<String, VfsError> {
        let name = path::validate_name(name)?;
        let parent = normalize_parent(parent)?;
        let new_path = path::join(&parent, &name);

        self.ensure_free(&new_path)?;

        self.store.insert(new_path.clone(), "");
        self.active = Some(new_path.clone());
        debug!(path = %new_path, "file created");
        Ok(new_path)
    }

    /// Create an empty folder `parent + name + "/"`.
    ///
    /// Fails if any existing key already lives under that folder, since the
    /// folder is then already implied.
    pub fn create_folder(&mut self, parent: &str, name: &str) -> Result<String, VfsError> {
        let name = path::validate_name(name)?;
        let parent = normalize_parent(parent)?;
        let new_path = path::as_folder(&path::join(&parent, &name));

        self.ensure_free(&new_path)?;

        self.store.insert(new_path.clone(), "");
        debug!(path = %new_path, "folder created");
        Ok(new_path)
    }

    /// Remove a single file. Returns true if it was the active entry.
    pub fn delete_file(&mut self, file: &str) -> Result<bool, VfsError> {
        if path::is_folder(file) || self.store.remove(file).is_none() {
            return Err(VfsError::NotFound(file.to_string()));
        }

        let was_active = self.active.as_deref() == Some(file);
        if was_active {
            self.active = None;
        }
        self.drop_stale_active();
        debug!(path = %file, "file deleted");
        Ok(was_active)
    }

    /// Remove a folder and every key underneath it.
    ///
    /// Returns the number of removed keys and whether the active entry was
    /// among them.
    pub fn delete_folder(&mut self, folder: &str) -> Result<(usize, bool), VfsError> {
        if folder.is_empty() {
            return Err(VfsError::InvalidName(folder.to_string()));
        }
        let folder = path::as_folder(folder);
        let doomed: Vec<String> = self.store.keys_under(&folder).map(str::to_string).collect();
        if doomed.is_empty() {
            return Err(VfsError::NotFound(folder));
        }

        for key in &doomed {
            self.store.remove(key);
        }

        let was_active = self
            .active
            .as_deref()
            .is_some_and(|active| path::is_descendant_of(active, &folder));
        if was_active {
            self.active = None;
        }
        self.drop_stale_active();
        debug!(path = %folder, removed = doomed.len(), "folder deleted");
        Ok((doomed.len(), was_active))
    }

    /// Give `old` a new last segment, keeping its kind and parent.
    ///
    /// Renaming to the current name is a no-op. Returns the new path.
    pub fn rename(&mut self, old: &str, new_name: &str) -> Result<String, VfsError> {
        let new_name = path::validate_name(new_name)?;
        self.ensure_exists(old)?;

        let mut new_path = path::join(&path::parent_folder(old), &new_name);
        if path::is_folder(old) {
            new_path.push(path::SEPARATOR);
        }
        if new_path == old {
            return Ok(new_path);
        }

        self.ensure_free(&new_path)?;
        self.rewrite_prefix(old, &new_path);
        debug!(from = %old, to = %new_path, "renamed");
        Ok(new_path)
    }

    /// Move `old` under `new_parent`, keeping its name. Returns the new path.
    pub fn move_entry(&mut self, old: &str, new_parent: &str) -> Result<String, VfsError> {
        self.ensure_exists(old)?;
        let new_parent = normalize_parent(new_parent)?;

        if path::is_folder(old) && path::is_descendant_of(&new_parent, old) {
            return Err(VfsError::MoveIntoDescendant {
                from: old.to_string(),
                to: new_parent,
            });
        }

        let mut new_path = path::join(&new_parent, path::name(old));
        if path::is_folder(old) {
            new_path.push(path::SEPARATOR);
        }
        if new_path == old {
            return Ok(new_path);
        }

        self.ensure_free(&new_path)?;
        self.rewrite_prefix(old, &new_path);
        debug!(from = %old, to = %new_path, "moved");
        Ok(new_path)
    }

    /// Select an entry. Files are returned for display.
    pub fn open(&mut self, target: &str) -> Result<Option<EditorView>, VfsError> {
        if target.is_empty() || !self.store.exists(target) {
            return Err(VfsError::NotFound(target.to_string()));
        }
        self.active = Some(target.to_string());
        Ok(self.editor_view())
    }

    /// Write new content for an existing file.
    pub fn update_content(&mut self, file: &str, content: String) -> Result<(), VfsError> {
        if path::is_folder(file) || !self.store.contains(file) {
            return Err(VfsError::NotFound(file.to_string()));
        }
        self.store.insert(file, content);
        Ok(())
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Run a [`Command`] against this session.
    pub fn dispatch(&mut self, command: Command) -> Result<CommandResult, VfsError> {
        match command {
            Command::CreateFile { parent, name } => {
                let created = self.create_file(&parent, &name)?;
                let editor = self.show_active();
                Ok(CommandResult::changed(created).with_editor(editor))
            }
            Command::CreateFolder { parent, name } => {
                let created = self.create_folder(&parent, &name)?;
                Ok(CommandResult::changed(created))
            }
            Command::DeleteFile(file) => {
                let was_active = self.delete_file(&file)?;
                Ok(CommandResult::changed(file).with_editor(blank_if(was_active)))
            }
            Command::DeleteFolder(folder) => {
                let (_, was_active) = self.delete_folder(&folder)?;
                Ok(CommandResult::changed(path::as_folder(&folder)).with_editor(blank_if(was_active)))
            }
            Command::Rename { path: old, new_name } => {
                let active_before = self.active.clone();
                let renamed = self.rename(&old, &new_name)?;
                Ok(self.relocated(renamed, active_before))
            }
            Command::Move { path: old, new_parent } => {
                let active_before = self.active.clone();
                let moved = self.move_entry(&old, &new_parent)?;
                Ok(self.relocated(moved, active_before))
            }
            Command::Open(target) => {
                self.open(&target)?;
                Ok(CommandResult {
                    editor: self.show_active(),
                    changed: false,
                    target: Some(target),
                })
            }
            Command::UpdateContent { path: file, content } => {
                self.update_content(&file, content)?;
                Ok(CommandResult::changed(file))
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn ensure_exists(&self, target: &str) -> Result<(), VfsError> {
        if target.is_empty() || !self.store.exists(target) {
            return Err(VfsError::NotFound(target.to_string()));
        }
        Ok(())
    }

    /// Reject a target taken by itself, its twin, or sitting under a file.
    fn ensure_free(&self, target: &str) -> Result<(), VfsError> {
        if self.store.is_occupied(target) {
            return Err(VfsError::NameConflict(target.to_string()));
        }
        if let Some(blocker) = path::ancestors(target)
            .into_iter()
            .find(|folder| self.store.contains(path::as_file(folder)))
        {
            return Err(VfsError::NameConflict(path::as_file(&blocker).to_string()));
        }
        Ok(())
    }

    /// Move every key under `old` to the same suffix under `new`.
    ///
    /// The caller has checked that nothing lives under `new` yet.
    fn rewrite_prefix(&mut self, old: &str, new: &str) {
        let moved: Vec<(String, String)> = self
            .store
            .keys_under(old)
            .filter_map(|key| path::rebase(key, old, new).map(|target| (key.to_string(), target)))
            .collect();

        let mut staged = Vec::with_capacity(moved.len());
        for (from, to) in moved {
            if let Some(content) = self.store.remove(&from) {
                staged.push((to, content));
            }
        }
        for (to, content) in staged {
            self.store.insert(to, content);
        }

        if let Some(rebased) = self
            .active
            .as_deref()
            .and_then(|active| path::rebase(active, old, new))
        {
            self.active = Some(rebased);
        }
        self.drop_stale_active();
    }

    /// Forget an active folder once nothing keeps it alive.
    ///
    /// Implied folders vanish with their last descendant.
    fn drop_stale_active(&mut self) {
        if self
            .active
            .as_deref()
            .is_some_and(|active| path::is_folder(active) && !self.store.folder_exists(active))
        {
            self.active = None;
        }
    }

    fn show_active(&self) -> EditorUpdate {
        match self.editor_view() {
            Some(view) => EditorUpdate::Show(view),
            None => EditorUpdate::Blank,
        }
    }

    /// Result for rename/move: reload the editor if the active entry moved.
    fn relocated(&self, target: String, active_before: Option<String>) -> CommandResult {
        let editor = if self.active != active_before {
            self.show_active()
        } else {
            EditorUpdate::Unchanged
        };
        CommandResult::changed(target).with_editor(editor)
    }
}

fn blank_if(cleared: bool) -> EditorUpdate {
    if cleared {
        EditorUpdate::Blank
    } else {
        EditorUpdate::Unchanged
    }
}

/// Parent folder in folder form; `""` for the root.
fn normalize_parent(parent: &str) -> Result<String, VfsError> {
    if parent.is_empty() {
        return Ok(String::new());
    }
    Ok(path::as_folder(&path::validate_path(parent)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(entries: &[(&str, &str)]) -> Session {
        Session::with_store(entries.iter().copied().collect())
    }

    fn keys(session: &Session) -> Vec<&str> {
        session.store().keys().collect()
    }

    // =========================================================================
    // Create
    // =========================================================================

    #[test]
    fn test_create_file_sets_active() {
        let mut s = Session::new();
        let created = s.create_file("src/", "a.js").unwrap();
        assert_eq!(created, "src/a.js");
        assert_eq!(s.store().get("src/a.js"), Some(""));
        assert_eq!(s.active_path(), Some("src/a.js"));
    }

    #[test]
    fn test_create_file_twice_conflicts() {
        let mut s = Session::new();
        s.create_file("src/", "a.js").unwrap();
        let before = s.store().clone();

        let err = s.create_file("src/", "a.js").unwrap_err();
        assert_eq!(err, VfsError::NameConflict("src/a.js".to_string()));
        assert_eq!(s.store(), &before);
    }

    #[test]
    fn test_create_file_rejects_bad_names() {
        let mut s = Session::new();
        assert!(matches!(s.create_file("", ""), Err(VfsError::InvalidName(_))));
        assert!(matches!(s.create_file("", "a/b"), Err(VfsError::InvalidName(_))));
        assert!(matches!(s.create_file("/abs", "x"), Err(VfsError::InvalidName(_))));
        assert!(s.store().is_empty());
    }

    #[test]
    fn test_create_folder_conflicts_with_implied_folder() {
        let mut s = session(&[("src/a.js", "1")]);
        let err = s.create_folder("", "src").unwrap_err();
        assert_eq!(err, VfsError::NameConflict("src/".to_string()));
        assert_eq!(keys(&s), vec!["src/a.js"]);
    }

    #[test]
    fn test_create_folder_inserts_marker() {
        let mut s = session(&[("main.js", "")]);
        let created = s.create_folder("", "docs").unwrap();
        assert_eq!(created, "docs/");
        assert_eq!(s.store().get("docs/"), Some(""));
        // Folder creation does not change the selection.
        assert_eq!(s.active_path(), Some("main.js"));
    }

    #[test]
    fn test_dual_entry_rejected() {
        let mut s = session(&[("a", "file"), ("b/", "")]);
        assert_eq!(
            s.create_folder("", "a").unwrap_err(),
            VfsError::NameConflict("a/".to_string())
        );
        assert_eq!(
            s.create_file("", "b").unwrap_err(),
            VfsError::NameConflict("b".to_string())
        );
        // Nothing may be created underneath a file either.
        assert_eq!(
            s.create_file("a/", "x.js").unwrap_err(),
            VfsError::NameConflict("a".to_string())
        );
    }

    // =========================================================================
    // Delete
    // =========================================================================

    #[test]
    fn test_delete_active_file_clears_active() {
        let mut s = session(&[("a.js", "x")]);
        assert_eq!(s.active_path(), Some("a.js"));

        let result = s.dispatch(Command::DeleteFile("a.js".into())).unwrap();
        assert!(s.store().is_empty());
        assert_eq!(s.active_path(), None);
        assert_eq!(result.editor, EditorUpdate::Blank);
    }

    #[test]
    fn test_delete_missing_file() {
        let mut s = session(&[("a.js", "x")]);
        assert_eq!(
            s.delete_file("b.js").unwrap_err(),
            VfsError::NotFound("b.js".to_string())
        );
        assert_eq!(keys(&s), vec!["a.js"]);
    }

    #[test]
    fn test_delete_folder_cascades_and_spares_siblings() {
        let mut s = session(&[
            ("src/", ""),
            ("src/a.js", "1"),
            ("src/lib/b.js", "2"),
            ("src2/c.js", "3"),
        ]);
        s.open("src/lib/b.js").unwrap();

        let (removed, was_active) = s.delete_folder("src/").unwrap();
        assert_eq!(removed, 3);
        assert!(was_active);
        assert_eq!(keys(&s), vec!["src2/c.js"]);
        assert!(s.store().keys().all(|k| !path::is_descendant_of(k, "src/")));
        assert_eq!(s.active_path(), None);
    }

    #[test]
    fn test_delete_folder_missing() {
        let mut s = session(&[("a.js", "")]);
        assert!(matches!(s.delete_folder("nope/"), Err(VfsError::NotFound(_))));
        assert!(matches!(s.delete_folder(""), Err(VfsError::InvalidName(_))));
    }

    // =========================================================================
    // Rename / Move
    // =========================================================================

    #[test]
    fn test_rename_folder_rewrites_prefix() {
        let mut s = session(&[("src/a.js", "1"), ("src/b.js", "2")]);
        let renamed = s.rename("src/", "lib").unwrap();
        assert_eq!(renamed, "lib/");

        let expected: ProjectStore = [("lib/a.js", "1"), ("lib/b.js", "2")].into_iter().collect();
        assert_eq!(s.store(), &expected);
        assert_eq!(s.active_path(), Some("lib/a.js"));
    }

    #[test]
    fn test_rename_does_not_touch_prefix_siblings() {
        let mut s = session(&[("src/a.js", "1"), ("src2/b.js", "2"), ("srcx", "3")]);
        s.rename("src/", "app").unwrap();
        assert_eq!(keys(&s), vec!["app/a.js", "src2/b.js", "srcx"]);
    }

    #[test]
    fn test_rename_preserves_suffix_and_content() {
        let mut s = session(&[("a/", ""), ("a/b/c.py", "print()"), ("a/d.md", "# d")]);
        let before: Vec<(String, String)> = s
            .store()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        s.rename("a/", "z").unwrap();

        assert!(s.store().keys().all(|k| !k.starts_with("a/")));
        for (key, content) in before {
            let moved = format!("z/{}", &key["a/".len()..]);
            assert_eq!(s.store().get(&moved), Some(content.as_str()));
        }
    }

    #[test]
    fn test_rename_file_keeps_parent() {
        let mut s = session(&[("src/a.js", "1")]);
        assert_eq!(s.rename("src/a.js", "b.js").unwrap(), "src/b.js");
        assert_eq!(s.active_path(), Some("src/b.js"));
    }

    #[test]
    fn test_rename_conflict_leaves_store() {
        let mut s = session(&[("a.js", "1"), ("b.js", "2"), ("lib/x.js", "3")]);
        let before = s.store().clone();
        assert_eq!(
            s.rename("a.js", "b.js").unwrap_err(),
            VfsError::NameConflict("b.js".to_string())
        );
        assert_eq!(
            s.rename("a.js", "lib").unwrap_err(),
            VfsError::NameConflict("lib".to_string())
        );
        assert_eq!(s.store(), &before);
    }

    #[test]
    fn test_rename_same_name_is_noop() {
        let mut s = session(&[("a.js", "1")]);
        assert_eq!(s.rename("a.js", "a.js").unwrap(), "a.js");
        assert_eq!(keys(&s), vec!["a.js"]);
    }

    #[test]
    fn test_rename_missing() {
        let mut s = session(&[("a.js", "1")]);
        assert!(matches!(s.rename("b.js", "c.js"), Err(VfsError::NotFound(_))));
        assert!(matches!(s.rename("a.js", ""), Err(VfsError::InvalidName(_))));
    }

    #[test]
    fn test_move_file_between_folders() {
        let mut s = session(&[("src/a.js", "1"), ("lib/", "")]);
        let result = s
            .dispatch(Command::Move {
                path: "src/a.js".into(),
                new_parent: "lib/".into(),
            })
            .unwrap();

        assert_eq!(result.target.as_deref(), Some("lib/a.js"));
        assert_eq!(keys(&s), vec!["lib/", "lib/a.js"]);
        assert_eq!(s.active_path(), Some("lib/a.js"));
        assert!(matches!(result.editor, EditorUpdate::Show(ref v) if v.path == "lib/a.js"));
    }

    #[test]
    fn test_move_folder_to_root() {
        let mut s = session(&[("a/b/c.js", "1"), ("a/d.js", "2")]);
        assert_eq!(s.move_entry("a/b/", "").unwrap(), "b/");
        assert_eq!(keys(&s), vec!["a/d.js", "b/c.js"]);
    }

    #[test]
    fn test_move_into_own_subtree_rejected() {
        let mut s = session(&[("a/b/c.js", "1")]);
        let err = s.move_entry("a/", "a/b/").unwrap_err();
        assert!(matches!(err, VfsError::MoveIntoDescendant { .. }));
        assert_eq!(keys(&s), vec!["a/b/c.js"]);
    }

    // =========================================================================
    // Open / Edit
    // =========================================================================

    #[test]
    fn test_open_file_and_folder() {
        let mut s = session(&[("src/a.py", "x = 1")]);
        let view = s.open("src/a.py").unwrap().unwrap();
        assert_eq!(view.content, "x = 1");
        assert_eq!(view.language.id(), "python");

        assert_eq!(s.open("src/").unwrap(), None);
        assert_eq!(s.active_path(), Some("src/"));

        assert!(matches!(s.open("missing.js"), Err(VfsError::NotFound(_))));
        assert_eq!(s.active_path(), Some("src/"));
    }

    #[test]
    fn test_active_implied_folder_cleared_when_emptied_by_delete() {
        let mut s = session(&[("src/a.js", ""), ("b.js", "")]);
        s.open("src/").unwrap();

        let result = s.dispatch(Command::DeleteFile("src/a.js".into())).unwrap();
        assert_eq!(keys(&s), vec!["b.js"]);
        assert_eq!(s.active_path(), None);
        assert_eq!(result.editor, EditorUpdate::Unchanged);
    }

    #[test]
    fn test_active_implied_folder_cleared_when_emptied_by_move() {
        let mut s = session(&[("src/a.js", "")]);
        s.open("src/").unwrap();

        s.move_entry("src/a.js", "").unwrap();
        assert_eq!(keys(&s), vec!["a.js"]);
        assert_eq!(s.active_path(), None);
    }

    #[test]
    fn test_active_folder_kept_while_still_populated() {
        let mut s = session(&[("src/a.js", ""), ("src/b.js", "")]);
        s.open("src/").unwrap();

        s.delete_file("src/a.js").unwrap();
        s.rename("src/b.js", "c.js").unwrap();
        assert_eq!(s.active_path(), Some("src/"));

        s.create_folder("src/", "docs").unwrap();
        s.move_entry("src/c.js", "").unwrap();
        assert_eq!(s.active_path(), Some("src/"));
    }

    #[test]
    fn test_update_content() {
        let mut s = session(&[("a.js", ""), ("d/", "")]);
        s.update_content("a.js", "let x = 1;".to_string()).unwrap();
        assert_eq!(s.store().get("a.js"), Some("let x = 1;"));

        assert!(s.update_content("d/", "nope".to_string()).is_err());
        assert!(s.update_content("zz.js", "nope".to_string()).is_err());
        assert_eq!(s.store().get("d/"), Some(""));
    }

    #[test]
    fn test_dispatch_create_file_shows_editor() {
        let mut s = Session::new();
        let result = s
            .dispatch(Command::CreateFile {
                parent: String::new(),
                name: "app.js".into(),
            })
            .unwrap();
        assert!(result.changed);
        assert_eq!(
            result.editor,
            EditorUpdate::Show(EditorView::new("app.js", ""))
        );
    }

    #[test]
    fn test_dispatch_open_is_not_a_change() {
        let mut s = session(&[("a.js", "1"), ("b.js", "2")]);
        let result = s.dispatch(Command::Open("b.js".into())).unwrap();
        assert!(!result.changed);
        assert_eq!(s.active_path(), Some("b.js"));
    }

    #[test]
    fn test_tree_reflects_store() {
        let s = session(&[("src/a.js", ""), ("docs/", "")]);
        let tree = s.tree();
        assert!(tree.find("src/a.js").is_some());
        assert!(tree.find("docs/").is_some());
        assert_eq!(tree.find("src/").unwrap().children().count(), 1);
    }
}
