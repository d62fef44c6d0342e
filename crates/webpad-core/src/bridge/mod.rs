//! Import/export bridge.
//!
//! Moves whole projects across the boundary with the host: a directory
//! picked by the user comes in through [`import_directory`], the project
//! goes out as an archive through [`export_archive`].

mod export;
mod import;

pub use export::{ArchiveSink, ZipSink, export_archive};
pub use import::{ImportReadError, ImportedFile, import_directory};
