use tracing::{info, warn};

use crate::error::BridgeError;
use crate::path;
use crate::store::ProjectStore;

/// A file read from the user's directory selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportedFile {
    /// Path relative to the selection, including the picked folder's name
    pub relative_path: String,
    pub content: String,
}

impl ImportedFile {
    pub fn new(relative_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }
}

/// A selected file the host could not read as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportReadError {
    pub path: String,
    pub reason: String,
}

impl ImportReadError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Build a replacement store from a directory selection.
///
/// Everything is buffered into a fresh store; the caller swaps it in only
/// when this returns `Ok`, so a failed import never leaves a half-filled
/// project behind. The first unreadable file or unusable path abandons the
/// whole import. A path selected twice keeps its last content.
pub fn import_directory<I>(files: I) -> Result<ProjectStore, BridgeError>
where
    I: IntoIterator<Item = Result<ImportedFile, ImportReadError>>,
{
    let mut staged = ProjectStore::new();

    for entry in files {
        let file = entry.map_err(|err| {
            warn!(path = %err.path, reason = %err.reason, "import abandoned: unreadable file");
            BridgeError::ImportPartialFailure {
                path: err.path,
                reason: err.reason,
            }
        })?;

        let key = match path::validate_path(&file.relative_path) {
            Ok(key) if !path::is_folder(&key) => key,
            _ => {
                warn!(path = %file.relative_path, "import abandoned: invalid path");
                return Err(BridgeError::InvalidImportPath(file.relative_path));
            }
        };
        staged.insert(key, file.content);
    }

    if staged.is_empty() {
        return Err(BridgeError::EmptySelection);
    }

    info!(files = staged.len(), "directory imported");
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(path: &str, content: &str) -> Result<ImportedFile, ImportReadError> {
        Ok(ImportedFile::new(path, content))
    }

    #[test]
    fn test_import_keeps_relative_paths() {
        let store = import_directory(vec![ok("proj/sub/b.py", "pass"), ok("proj/a.js", "1")]).unwrap();
        let keys: Vec<_> = store.keys().collect();
        assert_eq!(keys, vec!["proj/a.js", "proj/sub/b.py"]);
        assert_eq!(store.first_file(), Some("proj/a.js"));
    }

    #[test]
    fn test_read_failure_abandons_import() {
        let err = import_directory(vec![
            ok("proj/a.js", "1"),
            Err(ImportReadError::new("proj/img.bin", "not text")),
            ok("proj/c.js", "3"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            BridgeError::ImportPartialFailure {
                path: "proj/img.bin".into(),
                reason: "not text".into()
            }
        );
    }

    #[test]
    fn test_invalid_path_abandons_import() {
        assert_eq!(
            import_directory(vec![ok("/etc/passwd", "")]).unwrap_err(),
            BridgeError::InvalidImportPath("/etc/passwd".into())
        );
        assert!(matches!(
            import_directory(vec![ok("proj/../x", "")]),
            Err(BridgeError::InvalidImportPath(_))
        ));
        assert!(matches!(
            import_directory(vec![ok("proj/dir/", "")]),
            Err(BridgeError::InvalidImportPath(_))
        ));
    }

    #[test]
    fn test_empty_selection() {
        assert_eq!(
            import_directory(Vec::new()).unwrap_err(),
            BridgeError::EmptySelection
        );
    }

    #[test]
    fn test_import_normalizes_unicode() {
        let store = import_directory(vec![ok("proj/cafe\u{301}.md", "# hi")]).unwrap();
        assert_eq!(store.get("proj/caf\u{e9}.md"), Some("# hi"));
    }
}
