//! Root application module.
//!
//! Contains the main App component and AppContext definition.

use std::collections::{HashSet, VecDeque};

use leptos::prelude::*;
use webpad_core::{
    Console, ConsoleLine, EditorUpdate, EditorView, Project, Session, TreeNode, build_tree,
};

use crate::actions::Job;
use crate::components::Workspace;

/// Storage behind the project.
#[cfg(target_arch = "wasm32")]
pub type Backend = webpad_core::IndexedDbStorage;
#[cfg(not(target_arch = "wasm32"))]
pub type Backend = webpad_core::MemoryStorage;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// The [`Project`] itself is not reactive; after every operation the
/// derived views (tree, active path, editor, console) are pushed into
/// signals. While an async operation runs, the project is taken out of its
/// slot; actions queue behind it in `jobs`.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The project, `None` while loading or while an operation is running.
    pub project: StoredValue<Option<Project<Backend>>, LocalStorage>,
    /// Operations waiting for the project.
    pub jobs: StoredValue<VecDeque<Job>, LocalStorage>,
    pub busy: RwSignal<bool>,

    /// Explorer tree, rebuilt after each change.
    pub tree: RwSignal<TreeNode>,
    /// Folders expanded in the explorer.
    pub open_folders: RwSignal<HashSet<String>>,
    pub active: RwSignal<Option<String>>,

    /// File shown in the editor pane.
    pub editor: RwSignal<Option<EditorView>>,

    pub console: RwSignal<Console>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            project: StoredValue::new_local(None),
            jobs: StoredValue::new_local(VecDeque::new()),
            busy: RwSignal::new(true),
            tree: RwSignal::new(build_tree(std::iter::empty())),
            open_folders: RwSignal::new(HashSet::new()),
            active: RwSignal::new(None),
            editor: RwSignal::new(None),
            console: RwSignal::new(Console::new()),
        }
    }

    /// Take the project for an operation. `None` if another one is running.
    pub fn take_project(&self) -> Option<Project<Backend>> {
        let project = self.project.try_update_value(Option::take).flatten();
        if project.is_some() {
            self.busy.set(true);
        }
        project
    }

    /// Hand the project back and refresh everything derived from it.
    pub fn restore_project(&self, project: Project<Backend>) {
        self.sync(project.session());
        self.project.set_value(Some(project));
        self.busy.set(false);
    }

    /// Push session state into the reactive views.
    pub fn sync(&self, session: &Session) {
        self.tree.set(session.tree());
        let active = session.active_path().map(str::to_string);
        if let Some(active) = active.as_deref() {
            self.reveal(active);
        }
        self.active.set(active);
    }

    /// Apply an editor instruction from a command.
    pub fn apply_editor(&self, update: EditorUpdate) {
        match update {
            EditorUpdate::Unchanged => {}
            EditorUpdate::Show(view) => self.editor.set(Some(view)),
            EditorUpdate::Blank => self.editor.set(None),
        }
    }

    /// Expand every folder above `path`.
    pub fn reveal(&self, path: &str) {
        let ancestors = webpad_core::path::ancestors(path);
        if ancestors.is_empty() {
            return;
        }
        self.open_folders.update(|open| open.extend(ancestors));
    }

    pub fn toggle_folder(&self, folder: &str) {
        self.open_folders.update(|open| {
            if !open.remove(folder) {
                open.insert(folder.to_string());
            }
        });
    }

    pub fn push_console(&self, line: ConsoleLine) {
        self.console.update(|c| c.push(line));
    }

    pub fn push_lines(&self, lines: Vec<ConsoleLine>) {
        self.console.update(|c| lines.into_iter().for_each(|line| c.push(line)));
    }

    pub fn clear_console(&self) {
        self.console.update(Console::clear);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component.
///
/// Provides the global [`AppContext`], starts loading the project and
/// renders the workspace.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    crate::actions::boot(ctx);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div class="fatal">
                    <h1>"Something went wrong"</h1>
                    <ul>
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button on:click=move |_| {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().reload();
                        }
                    }>
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <Workspace />
        </ErrorBoundary>
    }
}
