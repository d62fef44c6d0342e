//! Application configuration.
//!
//! Centralizes the constants of the web shell. Storage and archive settings
//! live in `webpad_core::config`.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name shown in the toolbar.
pub const APP_NAME: &str = "webpad";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Logging
// =============================================================================

/// Default `tracing` filter directives.
pub const LOG_FILTER: &str = "webpad=info,webpad_core=info";

// =============================================================================
// Export
// =============================================================================

/// Downloaded archives are named `{EXPORT_PREFIX}-YYYY-MM-DD.zip`.
pub const EXPORT_PREFIX: &str = "project";

/// MIME type of the exported archive.
pub const EXPORT_MIME: &str = "application/zip";

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

/// Pixels of indentation per explorer nesting level.
pub const EXPLORER_INDENT_PX: usize = 14;
