//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (time, filesystem, processes, version control, LLM).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod llm;
pub mod process;
pub mod workspace;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use llm::{CompletionError, CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};
pub use process::{ProcessRunner, RunOutput};
pub use workspace::Workspace;
