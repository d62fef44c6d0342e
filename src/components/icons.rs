//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;
use webpad_core::Language;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuChevronDown as ChevronDown, LuChevronRight as ChevronRight, LuDownload as Download,
        LuEraser as Eraser, LuFile as File, LuFileCode as FileCode, LuFilePlus as NewFile,
        LuFileText as FileText, LuFolder as Folder, LuFolderOpen as FolderOpen,
        LuFolderPlus as NewFolder, LuMove as Move, LuPencil as Edit, LuPlay as Run,
        LuTerminal as Terminal, LuTrash2 as Trash, LuUpload as Upload,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowsMove as Move, BsChevronDown as ChevronDown, BsChevronRight as ChevronRight,
        BsDownload as Download, BsEraser as Eraser, BsFileEarmark as File,
        BsFileEarmarkCode as FileCode, BsFileEarmarkPlus as NewFile,
        BsFileEarmarkText as FileText, BsFolder2Open as FolderOpen, BsFolderFill as Folder,
        BsFolderPlus as NewFolder, BsPencil as Edit, BsPlayFill as Run, BsTerminal as Terminal,
        BsTrash as Trash, BsUpload as Upload,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(CHEVRON_DOWN, ChevronDown);
themed_icon!(FOLDER, Folder);
themed_icon!(FOLDER_OPEN, FolderOpen);
themed_icon!(FILE, File);
themed_icon!(FILE_CODE, FileCode);
themed_icon!(FILE_TEXT, FileText);
themed_icon!(NEW_FILE, NewFile);
themed_icon!(NEW_FOLDER, NewFolder);
themed_icon!(UPLOAD, Upload);
themed_icon!(DOWNLOAD, Download);
themed_icon!(TRASH, Trash);
themed_icon!(EDIT, Edit);
themed_icon!(MOVE, Move);
themed_icon!(RUN, Run);
themed_icon!(TERMINAL, Terminal);
themed_icon!(ERASER, Eraser);

/// Icon for a file in the explorer.
pub fn file_icon(language: Language) -> Icon {
    match language {
        Language::Markdown => FILE_TEXT,
        Language::PlainText => FILE,
        _ => FILE_CODE,
    }
}
