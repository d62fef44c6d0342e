//! Browser utilities for the web shell.
//!
//! Provides:
//! - [`dom`] - window/document access, prompts, downloads
//! - [`files`] - reading a directory selection
//! - [`format`] - display strings
//! - [`logging`] - `tracing` subscriber writing to the browser console
//! - [`script`] - running the active file with captured console output

pub mod dom;
pub mod files;
pub mod format;
pub mod logging;
pub mod script;
