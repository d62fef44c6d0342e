//! Project: a [`Session`] bound to a [`StorageBackend`].
//!
//! Every successful mutation is followed by a whole-store save. A failed
//! save is logged and handed back next to the mutation's result; the
//! in-memory change is never rolled back, so the user can keep working and
//! the next successful save catches the record up.

use tracing::{error, info, warn};

use crate::bridge::{self, ArchiveSink, ImportReadError, ImportedFile};
use crate::command::{Command, CommandResult, EditorUpdate, EditorView};
use crate::config::{SEED_CONTENT, SEED_FILE};
use crate::error::{BridgeError, PersistenceError, VfsError};
use crate::persistence::StorageBackend;
use crate::session::Session;
use crate::store::ProjectStore;

/// How the project came up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenReport {
    /// No record existed; the starter file was created
    pub seeded: bool,
    /// The record could not be read; the session started empty
    pub load_error: Option<PersistenceError>,
    /// Saving the seeded project failed
    pub persist_error: Option<PersistenceError>,
}

/// Result of an operation that was followed by a save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome<T> {
    pub result: T,
    /// Set when the in-memory change could not be saved
    pub persist_error: Option<PersistenceError>,
}

impl<T> Outcome<T> {
    fn new(result: T, persist_error: Option<PersistenceError>) -> Self {
        Self {
            result,
            persist_error,
        }
    }
}

pub struct Project<B> {
    session: Session,
    backend: B,
}

impl<B: StorageBackend> Project<B> {
    /// Load the saved project, seeding a starter file on first run.
    ///
    /// A record that cannot be read leaves the session empty and writes
    /// nothing, so the stored record is not clobbered by an empty one.
    pub async fn open(backend: B) -> (Self, OpenReport) {
        let mut project = Self {
            session: Session::new(),
            backend,
        };
        let mut report = OpenReport::default();

        match project.backend.load().await {
            Ok(Some(store)) => {
                info!(entries = store.len(), "project loaded");
                project.session.replace_store(store);
            }
            Ok(None) => {
                let seed: ProjectStore = [(SEED_FILE, SEED_CONTENT)].into_iter().collect();
                project.session.replace_store(seed);
                report.seeded = true;
                report.persist_error = project.persist().await;
                info!(file = SEED_FILE, "new project seeded");
            }
            Err(err) => {
                error!("failed to load project: {}", err);
                report.load_error = Some(err);
            }
        }

        (project, report)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn store(&self) -> &ProjectStore {
        self.session.store()
    }

    pub fn editor_view(&self) -> Option<EditorView> {
        self.session.editor_view()
    }

    /// Dispatch a command and save if it changed the store.
    pub async fn execute(&mut self, command: Command) -> Result<Outcome<CommandResult>, VfsError> {
        let result = self.session.dispatch(command)?;
        let persist_error = if result.changed {
            self.persist().await
        } else {
            None
        };
        Ok(Outcome::new(result, persist_error))
    }

    /// Replace the whole project with a directory selection.
    ///
    /// The current project stays untouched unless every file was read.
    pub async fn import_directory<I>(&mut self, files: I) -> Result<Outcome<EditorUpdate>, BridgeError>
    where
        I: IntoIterator<Item = Result<ImportedFile, ImportReadError>>,
    {
        let store = bridge::import_directory(files)?;
        self.session.replace_store(store);

        let editor = match self.session.editor_view() {
            Some(view) => EditorUpdate::Show(view),
            None => EditorUpdate::Blank,
        };
        let persist_error = self.persist().await;
        Ok(Outcome::new(editor, persist_error))
    }

    /// Archive the current project into `sink`.
    pub fn export_archive<S: ArchiveSink>(&self, sink: Option<S>) -> Result<S::Output, BridgeError> {
        bridge::export_archive(self.session.store(), sink)
    }

    /// Drop every file and the stored record, then save the empty project.
    ///
    /// The in-memory project is emptied even if the backend fails.
    pub async fn reset(&mut self) -> Result<(), PersistenceError> {
        self.session.reset();
        if let Err(err) = self.backend.reset().await {
            error!("failed to reset storage: {}", err);
            return Err(err);
        }
        match self.persist().await {
            Some(err) => Err(err),
            None => {
                info!("project cleared");
                Ok(())
            }
        }
    }

    async fn persist(&self) -> Option<PersistenceError> {
        match self.backend.save(self.session.store()).await {
            Ok(()) => None,
            Err(err) => {
                warn!("failed to save project: {}", err);
                Some(err)
            }
        }
    }
}
