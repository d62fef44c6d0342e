//! UI components built with Leptos.
//!
//! - [`Workspace`] - Page layout (toolbar, explorer, editor, console)
//! - [`toolbar`] - Project-level actions
//! - [`explorer`] - Project tree
//! - [`editor`] - Editing pane for the active file
//! - [`console`] - Run output
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod console;
pub mod editor;
pub mod explorer;
pub mod icons;
pub mod toolbar;
mod workspace;

pub use workspace::Workspace;
