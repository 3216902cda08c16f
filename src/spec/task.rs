//! Task and evaluation types.

use serde::{Deserialize, Serialize};

/// One unit of work within a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier, unique within the plan.
    pub name: String,
    /// Whether the task has already been completed. Set by the run loop
    /// only on confirmed success; never reverted.
    #[serde(default)]
    pub done: bool,
    /// Instruction text handed to the coding agent.
    pub prompt: String,
    /// How to check whether the agent's work counted as successful.
    /// Absent means a zero-exit agent invocation is success.
    #[serde(default)]
    pub evaluation: Option<Evaluation>,
}

/// How a task's outcome is evaluated after the agent exits cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Evaluation {
    /// Run the plan-wide `test_command`; success iff it exits 0.
    Test,
    /// Run a task-specific command; on zero exit, optionally ask the
    /// judgment client whether its output demonstrates success.
    Command {
        /// The shell command to run.
        command: String,
        /// Yes/no question put to the judgment client with the command's
        /// stdout as evidence. When absent, zero exit alone is success.
        #[serde(default)]
        check_prompt: Option<String>,
    },
}
