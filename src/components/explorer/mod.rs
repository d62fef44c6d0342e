//! Project explorer.
//!
//! Components:
//! - [`Explorer`] - Tree of the project, rebuilt from the key set
//! - [`ExplorerRow`] - One file or folder line with its actions

#[allow(clippy::module_inception)]
mod explorer;
mod row;

pub use explorer::Explorer;
pub use row::ExplorerRow;
