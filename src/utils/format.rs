//! Formatting helpers for text shown in the UI.

use crate::config::EXPORT_PREFIX;

/// File name for an exported archive, e.g. `project-2024-05-01.zip`.
pub fn archive_name(date: &str) -> String {
    format!("{}-{}.zip", EXPORT_PREFIX, date)
}

/// Display label for a path in prompts and messages (root shows as `/`).
pub fn display_path(path: &str) -> &str {
    if path.is_empty() { "/" } else { path }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_name() {
        assert_eq!(archive_name("2024-05-01"), "project-2024-05-01.zip");
    }

    #[test]
    fn test_display_path() {
        assert_eq!(display_path(""), "/");
        assert_eq!(display_path("src/"), "src/");
    }
}
