use std::collections::BTreeSet;
use std::io::{Cursor, Write};

use tracing::info;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::ZIP_COMPRESSION_LEVEL;
use crate::error::BridgeError;
use crate::path;
use crate::store::ProjectStore;

/// Destination for an exported project.
pub trait ArchiveSink {
    type Output;

    /// Add a directory entry. `folder` keeps its trailing separator.
    fn add_folder(&mut self, folder: &str) -> Result<(), BridgeError>;

    /// Add a file entry.
    fn add_file(&mut self, file: &str, content: &str) -> Result<(), BridgeError>;

    /// Seal the archive.
    fn finish(self) -> Result<Self::Output, BridgeError>;
}

/// Deflate-compressed zip archive built in memory.
pub struct ZipSink {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: FileOptions,
}

impl ZipSink {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: FileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(ZIP_COMPRESSION_LEVEL)),
        }
    }
}

impl Default for ZipSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveSink for ZipSink {
    type Output = Vec<u8>;

    fn add_folder(&mut self, folder: &str) -> Result<(), BridgeError> {
        self.writer.add_directory(folder, self.options)?;
        Ok(())
    }

    fn add_file(&mut self, file: &str, content: &str) -> Result<(), BridgeError> {
        self.writer.start_file(file, self.options)?;
        self.writer.write_all(content.as_bytes())?;
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>, BridgeError> {
        let cursor = self.writer.finish()?;
        Ok(cursor.into_inner())
    }
}

/// Write the whole project into `sink`.
///
/// Folder markers and the folders implied by file paths each become one
/// directory entry, written before anything inside them. `sink` is `None`
/// when the host has no archiver to offer.
pub fn export_archive<S: ArchiveSink>(
    store: &ProjectStore,
    sink: Option<S>,
) -> Result<S::Output, BridgeError> {
    if store.is_empty() {
        return Err(BridgeError::EmptyProject);
    }
    let mut sink = sink.ok_or(BridgeError::ExportUnavailable)?;

    let mut folders = BTreeSet::new();
    for (key, content) in store.iter() {
        for folder in path::ancestors(key) {
            if folders.insert(folder.clone()) {
                sink.add_folder(&folder)?;
            }
        }
        if path::is_folder(key) {
            if folders.insert(key.to_string()) {
                sink.add_folder(key)?;
            }
        } else {
            sink.add_file(key, content)?;
        }
    }

    info!(entries = store.len(), "project exported");
    sink.finish()
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;

    /// Records calls instead of writing anything.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl ArchiveSink for Recorder {
        type Output = Vec<String>;

        fn add_folder(&mut self, folder: &str) -> Result<(), BridgeError> {
            self.calls.push(format!("dir {}", folder));
            Ok(())
        }

        fn add_file(&mut self, file: &str, content: &str) -> Result<(), BridgeError> {
            self.calls.push(format!("file {} ({})", file, content));
            Ok(())
        }

        fn finish(self) -> Result<Vec<String>, BridgeError> {
            Ok(self.calls)
        }
    }

    fn sample() -> ProjectStore {
        [
            ("main.js", "m"),
            ("src/", ""),
            ("src/a.js", "a"),
            ("src/lib/b.js", "b"),
            ("docs/", ""),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_folders_written_once_before_contents() {
        let calls = export_archive(&sample(), Some(Recorder::default())).unwrap();
        assert_eq!(
            calls,
            vec![
                "dir docs/",
                "file main.js (m)",
                "dir src/",
                "file src/a.js (a)",
                "dir src/lib/",
                "file src/lib/b.js (b)",
            ]
        );
    }

    #[test]
    fn test_export_preconditions() {
        assert_eq!(
            export_archive(&ProjectStore::new(), Some(Recorder::default())).unwrap_err(),
            BridgeError::EmptyProject
        );
        assert_eq!(
            export_archive::<Recorder>(&sample(), None).unwrap_err(),
            BridgeError::ExportUnavailable
        );
    }

    #[test]
    fn test_zip_archive_contents() {
        let bytes = export_archive(&sample(), Some(ZipSink::new())).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(
            names,
            vec!["docs/", "main.js", "src/", "src/a.js", "src/lib/", "src/lib/b.js"]
        );

        let mut entry = archive.by_name("src/lib/b.js").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "b");
        drop(entry);

        assert!(archive.by_name("docs/").unwrap().is_dir());
    }
}
