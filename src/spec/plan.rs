//! Validated task plan and agent configuration.

use serde::{Deserialize, Serialize};

use super::task::{Evaluation, Task};

/// Configuration for the external coding agent, shared by every task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model identifier passed to the agent (e.g. `"gpt-4o"`).
    pub model: String,
    /// Whether to invoke the agent in architect mode.
    #[serde(default)]
    pub architect_mode: bool,
    /// File globs the agent may edit, in declaration order.
    #[serde(default)]
    pub editable_files: Vec<String>,
    /// File globs the agent may read but not edit, in declaration order.
    #[serde(default)]
    pub readonly_files: Vec<String>,
    /// Maximum number of execution attempts per task. Zero means a task
    /// is exhausted without the agent ever being invoked.
    pub retries: u32,
    /// Command run for `test`-type evaluations.
    #[serde(default)]
    pub test_command: Option<String>,
}

/// A validated task plan: agent configuration, shared context, and an
/// ordered, non-empty list of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Agent configuration block.
    #[serde(rename = "aider_config")]
    pub agent: AgentConfig,
    /// What the plan as a whole is trying to achieve. Immutable once
    /// loaded; shared read-only across all tasks.
    pub objective: String,
    /// Implementation guidance shared across all tasks.
    pub implementation_details: String,
    /// The tasks to execute, in order.
    pub tasks: Vec<Task>,
}

impl Plan {
    /// Checks structural rules the schema alone cannot express.
    ///
    /// Rejects: empty model, empty task list, empty or duplicate task
    /// names, empty prompts, and command evaluations with an empty
    /// command or a present-but-empty check prompt.
    ///
    /// # Errors
    ///
    /// Returns a message naming every violation, separated by `"; "`.
    pub fn validate(&self) -> Result<(), String> {
        let mut problems = Vec::new();

        if self.agent.model.trim().is_empty() {
            problems.push("aider_config.model must not be empty".to_string());
        }
        if self.tasks.is_empty() {
            problems.push("plan must contain at least one task".to_string());
        }

        let mut seen = std::collections::HashSet::new();
        for (idx, task) in self.tasks.iter().enumerate() {
            if task.name.trim().is_empty() {
                problems.push(format!("task #{} has an empty name", idx + 1));
            } else if !seen.insert(task.name.as_str()) {
                problems.push(format!("duplicate task name '{}'", task.name));
            }
            if task.prompt.trim().is_empty() {
                problems.push(format!("task '{}' has an empty prompt", task.name));
            }
            if let Some(Evaluation::Command { command, check_prompt }) = &task.evaluation {
                if command.trim().is_empty() {
                    problems.push(format!("task '{}' has an empty evaluation command", task.name));
                }
                if let Some(check) = check_prompt {
                    if check.trim().is_empty() {
                        problems.push(format!(
                            "task '{}' has an empty evaluation check_prompt",
                            task.name
                        ));
                    }
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }
}
