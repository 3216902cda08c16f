//! Workspace port for isolated version-control working contexts.

use std::path::PathBuf;

/// Provisions isolated branch + working-copy contexts for a run.
///
/// Abstracting version control lets the engine acquire a working directory
/// without knowing whether git, a plain directory, or a test fake backs it.
pub trait Workspace: Send + Sync {
    /// Creates or reuses the isolated working context named after `target`,
    /// returning the path to its working copy.
    ///
    /// Must be idempotent: "already exists" is not an error, and calling
    /// twice for the same target returns an equivalent path both times.
    ///
    /// # Errors
    ///
    /// Returns an error if the context cannot be created or reused.
    fn acquire(&self, target: &str) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>>;

    /// Removes the working context for `target`, best-effort.
    ///
    /// # Errors
    ///
    /// Returns an error for genuine removal failures; "not found" is not
    /// an error.
    fn release(&self, target: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
