//! Editor language hints.
//!
//! The editing widget highlights by language id; the id is picked from the
//! file extension with a fixed table.

/// Languages the editor is told about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    Html,
    Css,
    Python,
    Json,
    Markdown,
    PlainText,
}

impl Language {
    /// Detect language from a path's extension (case-insensitive).
    pub fn from_path(path: &str) -> Self {
        let ext = path.rsplit('.').next().map(|s| s.to_lowercase());
        match ext.as_deref() {
            Some("js") => Self::JavaScript,
            Some("html") => Self::Html,
            Some("css") => Self::Css,
            Some("py") => Self::Python,
            Some("json") => Self::Json,
            Some("md") => Self::Markdown,
            _ => Self::PlainText,
        }
    }

    /// Identifier handed to the editing widget.
    pub fn id(self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::Html => "html",
            Self::Css => "css",
            Self::Python => "python",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::PlainText => "plaintext",
        }
    }

    /// Whether the run button can execute this file.
    pub fn is_runnable(self) -> bool {
        self == Self::JavaScript
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_detection() {
        assert_eq!(Language::from_path("main.js"), Language::JavaScript);
        assert_eq!(Language::from_path("src/index.HTML"), Language::Html);
        assert_eq!(Language::from_path("style.css"), Language::Css);
        assert_eq!(Language::from_path("proj/sub/b.py"), Language::Python);
        assert_eq!(Language::from_path("package.json"), Language::Json);
        assert_eq!(Language::from_path("README.md"), Language::Markdown);
        assert_eq!(Language::from_path("Makefile"), Language::PlainText);
        assert_eq!(Language::from_path("notes.txt"), Language::PlainText);
    }

    #[test]
    fn test_language_ids() {
        assert_eq!(Language::from_path("a.js").id(), "javascript");
        assert_eq!(Language::from_path("a.py").id(), "python");
        assert_eq!(Language::from_path("a.rs").id(), "plaintext");
        assert!(Language::JavaScript.is_runnable());
        assert!(!Language::Python.is_runnable());
    }
}
