//! Live workspace adapter using `git` CLI worktrees.

use std::path::PathBuf;
use std::process::Command;

use crate::ports::workspace::Workspace;

/// Branch namespace for working contexts created by this tool.
const BRANCH_PREFIX: &str = "drover/";

/// Directory under the repository root where worktrees are placed.
const WORKTREE_DIR: &str = ".drover/worktrees";

/// Live workspace adapter that shells out to the `git` CLI.
///
/// Each target gets a branch `drover/<target>` checked out in an isolated
/// worktree at `.drover/worktrees/<target>`. The enclosing repository is
/// resolved from a base directory, never from process-wide state.
pub struct LiveWorkspace {
    base: PathBuf,
}

impl LiveWorkspace {
    /// Creates a workspace resolving the repository from the directory
    /// the process was started in.
    #[must_use]
    pub fn new() -> Self {
        Self::rooted_at(PathBuf::from("."))
    }

    /// Creates a workspace resolving the repository from `base`.
    #[must_use]
    pub fn rooted_at(base: PathBuf) -> Self {
        Self { base }
    }

    fn git(&self, args: &[&str]) -> Result<std::process::Output, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Command::new("git").args(args).current_dir(&self.base).output()?)
    }

    fn repo_root(&self) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
        let output = self.git(&["rev-parse", "--show-toplevel"])?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git rev-parse --show-toplevel failed: {stderr}").into());
        }
        Ok(PathBuf::from(String::from_utf8_lossy(&output.stdout).trim()))
    }

    fn branch_exists(&self, branch: &str) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let output =
            self.git(&["rev-parse", "--verify", "--quiet", &format!("refs/heads/{branch}")])?;
        Ok(output.status.success())
    }
}

impl Default for LiveWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace for LiveWorkspace {
    fn acquire(&self, target: &str) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
        let root = self.repo_root()?;
        let path = root.join(WORKTREE_DIR).join(target);
        let branch = format!("{BRANCH_PREFIX}{target}");

        // Reuse an existing worktree: acquisition is idempotent.
        if path.join(".git").exists() {
            return Ok(path);
        }

        let path_str = path.to_string_lossy().into_owned();
        let output = if self.branch_exists(&branch)? {
            self.git(&["worktree", "add", &path_str, &branch])?
        } else {
            self.git(&["worktree", "add", "-b", &branch, &path_str])?
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git worktree add for '{target}' failed: {stderr}").into());
        }
        Ok(path)
    }

    fn release(&self, target: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let root = self.repo_root()?;
        let path = root.join(WORKTREE_DIR).join(target);

        if !path.exists() {
            // Nothing to remove; release is best-effort.
            return Ok(());
        }

        let path_str = path.to_string_lossy().into_owned();
        let output = self.git(&["worktree", "remove", "--force", &path_str])?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("is not a working tree") {
                return Ok(());
            }
            return Err(format!("git worktree remove for '{target}' failed: {stderr}").into());
        }
        Ok(())
    }
}
