//! Attempt prompt assembly and agent command-line construction.

use std::fmt::Write as _;

use crate::spec::{AgentConfig, Plan, Task};

/// Builds the prompt for one attempt: objective, implementation details,
/// and the task's own instruction, as labeled sections in that order.
#[must_use]
pub fn build_prompt(plan: &Plan, task: &Task) -> String {
    let mut prompt = String::new();
    let _ = write!(prompt, "## Objective\n\n{}\n\n", plan.objective.trim());
    let _ = write!(
        prompt,
        "## Implementation details\n\n{}\n\n",
        plan.implementation_details.trim()
    );
    let _ = write!(prompt, "## Task\n\n{}\n", task.prompt.trim());
    prompt
}

/// Builds the agent's argument list from its configuration, with the
/// prompt as the final argument.
#[must_use]
pub fn agent_args(agent: &AgentConfig, prompt: &str) -> Vec<String> {
    let mut args = vec!["--model".to_string(), agent.model.clone()];
    if agent.architect_mode {
        args.push("--architect".to_string());
    }
    if !agent.editable_files.is_empty() {
        args.push("--files".to_string());
        args.extend(agent.editable_files.iter().cloned());
    }
    if !agent.readonly_files.is_empty() {
        args.push("--readonly".to_string());
        args.extend(agent.readonly_files.iter().cloned());
    }
    args.push(prompt.to_string());
    args
}
