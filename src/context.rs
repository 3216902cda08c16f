//! Service context bundling all port trait objects.

use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::llm::LlmClient;
use crate::ports::process::ProcessRunner;
use crate::ports::workspace::Workspace;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Fields are public
/// so tests can assemble a context from fake adapters directly.
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// Filesystem for file I/O.
    pub fs: Box<dyn FileSystem>,
    /// Process runner for external commands (agent, tests, checks).
    pub runner: Box<dyn ProcessRunner>,
    /// Workspace provider for isolated branch + worktree contexts.
    pub workspace: Box<dyn Workspace>,
    /// LLM client for language-model completions.
    pub llm: Box<dyn LlmClient>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live() -> Self {
        use crate::adapters::live::clock::LiveClock;
        use crate::adapters::live::filesystem::LiveFileSystem;
        use crate::adapters::live::llm::LiveLlmClient;
        use crate::adapters::live::process::LiveProcessRunner;
        use crate::adapters::live::workspace::LiveWorkspace;

        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            runner: Box::new(LiveProcessRunner),
            workspace: Box::new(LiveWorkspace::new()),
            llm: Box::new(LiveLlmClient::new()),
        }
    }
}
