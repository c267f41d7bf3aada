//! # Definition Stores
//!
//! A definition store persists the raw text of each view: its configuration
//! XML and its template. Stores know nothing about the structure of either
//! file; parsing and validation live in [`crate::view`].
//!
//! Every view lives in its own directory, named after its handle, and holds
//! two files:
//!
//! ```text
//! blog/
//!   blog.config.xml
//!   blog.xsl
//!   articles/
//!     articles.config.xml
//!     articles.xsl
//! ```
//!
//! A directory only counts as a view when its `<handle>.config.xml` exists.
//!
//! Two implementations are provided:
//!
//! - [`DiskStore`]: a views directory on the host filesystem.
//! - [`MemoryStore`]: an in-memory map of files, used for tests and dry runs.

use crate::error::Result;

pub mod disk;
pub mod memory;

pub use disk::DiskStore;
pub use memory::MemoryStore;

/// The raw text of one view definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Contents of `<handle>.config.xml`
    pub config: String,
    /// Contents of `<handle>.xsl`, if the file exists
    pub template: Option<String>,
}

/// Key-value persistence for view definitions, keyed by view path.
///
/// Paths are normalized view paths (`blog/articles`); the empty path names
/// the root of the tree, which is a directory but never a view.
pub trait DefinitionStore {
    /// Load the definition at `path`.
    ///
    /// Fails with `NotFound` when the configuration file is missing.
    fn load(&self, path: &str) -> Result<Definition>;

    /// Write the configuration and template of the view at `path`,
    /// creating directories as needed.
    fn store(&mut self, path: &str, config: &str, template: &str) -> Result<()>;

    /// Move the view at `from` (and everything beneath it) to `to`,
    /// renaming its configuration and template files to the new handle.
    fn rename(&mut self, from: &str, to: &str) -> Result<()>;

    /// Remove the directory of the view at `path` and everything beneath it.
    fn delete(&mut self, path: &str) -> Result<()>;

    /// Whether a view exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Whether `path` is a directory in the tree, view or not.
    fn is_dir(&self, path: &str) -> bool;

    /// Handles of the immediate subdirectories of `path` that are views,
    /// sorted by name.
    fn child_handles(&self, path: &str) -> Result<Vec<String>>;
}
