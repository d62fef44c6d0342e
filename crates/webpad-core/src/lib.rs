//! Virtual project file system for the webpad editor.
//!
//! A project is a flat map from path to text ([`ProjectStore`]); folders
//! are implied by paths or kept as empty marker entries. On top of that:
//!
//! - `path`: path string model (folder vs file, ancestry, validation)
//! - `tree`: explorer tree derived from the key set
//! - `session`: mutation engine and active path
//! - `command`: request/response types for [`Session::dispatch`]
//! - `persistence`: storage backends for the project record
//! - `project`: session plus write-through persistence
//! - `bridge`: directory import and archive export
//! - `language`: editor language ids
//! - `console`: run output model

pub mod bridge;
pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod language;
pub mod path;
pub mod persistence;
pub mod project;
pub mod session;
pub mod store;
pub mod tree;

pub use bridge::{ArchiveSink, ImportReadError, ImportedFile, ZipSink};
pub use command::{Command, CommandResult, EditorUpdate, EditorView};
pub use console::{Console, ConsoleLevel, ConsoleLine};
pub use error::{BridgeError, PersistenceError, VfsError};
pub use language::Language;
pub use path::EntryKind;
pub use persistence::{MemoryStorage, StorageBackend};
#[cfg(target_arch = "wasm32")]
pub use persistence::IndexedDbStorage;
pub use project::{OpenReport, Outcome, Project};
pub use session::Session;
pub use store::ProjectStore;
pub use tree::{TreeNode, TreeRow, build_tree};
