//! Mutation requests and their results.
//!
//! Every UI action that touches the project is expressed as a [`Command`]
//! and handed to [`Session::dispatch`](crate::Session::dispatch), the single
//! operation handler. The handler answers with a [`CommandResult`] telling
//! the caller what to do with the editing widget and whether the store
//! changed (and therefore needs to be persisted).

use std::fmt;

use crate::language::Language;

/// What the editing widget should display for a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorView {
    pub path: String,
    pub content: String,
    pub language: Language,
}

impl EditorView {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let language = Language::from_path(&path);
        Self {
            path,
            content: content.into(),
            language,
        }
    }
}

/// Instruction for the editing widget after a command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditorUpdate {
    /// Leave the widget as it is
    #[default]
    Unchanged,
    /// Load this file into the widget
    Show(EditorView),
    /// Clear the widget (active entry gone, or a folder selected)
    Blank,
}

/// A request to change or navigate the project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create an empty file `parent + name` and open it
    CreateFile { parent: String, name: String },
    /// Create an empty folder `parent + name + "/"`
    CreateFolder { parent: String, name: String },
    DeleteFile(String),
    /// Delete a folder and everything underneath it
    DeleteFolder(String),
    /// Replace the last segment of `path`
    Rename { path: String, new_name: String },
    /// Re-parent `path` under `new_parent`
    Move { path: String, new_parent: String },
    /// Select an entry and show it in the editor
    Open(String),
    /// Content-changed notification from the editing widget
    UpdateContent { path: String, content: String },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateFile { parent, name } => write!(f, "create file {}{}", parent, name),
            Self::CreateFolder { parent, name } => write!(f, "create folder {}{}/", parent, name),
            Self::DeleteFile(path) => write!(f, "delete file {}", path),
            Self::DeleteFolder(path) => write!(f, "delete folder {}", path),
            Self::Rename { path, new_name } => write!(f, "rename {} to {}", path, new_name),
            Self::Move { path, new_parent } => {
                let target = if new_parent.is_empty() { "/" } else { new_parent.as_str() };
                write!(f, "move {} into {}", path, target)
            }
            Self::Open(path) => write!(f, "open {}", path),
            Self::UpdateContent { path, .. } => write!(f, "edit {}", path),
        }
    }
}

/// Result of a successfully dispatched command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// What the editing widget should do
    pub editor: EditorUpdate,
    /// Whether the store was modified (persist if so)
    pub changed: bool,
    /// Path the command produced or acted on, after any rename/move
    pub target: Option<String>,
}

impl CommandResult {
    /// A store change with no editor side effect.
    pub fn changed(target: impl Into<String>) -> Self {
        Self {
            editor: EditorUpdate::Unchanged,
            changed: true,
            target: Some(target.into()),
        }
    }

    /// Attach an editor instruction.
    pub fn with_editor(mut self, editor: EditorUpdate) -> Self {
        self.editor = editor;
        self
    }
}
