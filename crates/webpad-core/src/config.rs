//! Core configuration.
//!
//! Centralizes the constants shared by the persistence gateway, the project
//! bootstrap and the archive exporter.

// =============================================================================
// Persistence
// =============================================================================

/// IndexedDB database name.
pub const DB_NAME: &str = "code_editor_db";

/// IndexedDB schema version. Bumping it triggers an upgrade.
pub const DB_VERSION: u32 = 1;

/// Object store holding the project record.
pub const STORE_NAME: &str = "files";

/// Key of the single record holding the whole project.
pub const RECORD_KEY: &str = "fileTree";

/// Where and how the project record is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdbConfig {
    pub db_name: String,
    pub version: u32,
    pub store_name: String,
    pub record_key: String,
}

impl Default for IdbConfig {
    fn default() -> Self {
        Self {
            db_name: DB_NAME.to_string(),
            version: DB_VERSION,
            store_name: STORE_NAME.to_string(),
            record_key: RECORD_KEY.to_string(),
        }
    }
}

// =============================================================================
// First Run
// =============================================================================

/// File created when no project has been saved yet.
pub const SEED_FILE: &str = "main.js";

/// Content of [`SEED_FILE`].
pub const SEED_CONTENT: &str = "// Your initial code here";

// =============================================================================
// Export
// =============================================================================

/// Deflate level used for exported archives.
pub const ZIP_COMPRESSION_LEVEL: i32 = 6;

// =============================================================================
// Console
// =============================================================================

/// Maximum number of console lines kept; older lines are dropped first.
pub const CONSOLE_CAPACITY: usize = 500;
