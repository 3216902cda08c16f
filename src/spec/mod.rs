//! Task-plan spec model: YAML parsing, validation, and templates.

pub mod plan;
pub mod task;
pub mod template;

use std::path::Path;

use crate::context::ServiceContext;

pub use plan::{AgentConfig, Plan};
pub use task::{Evaluation, Task};

/// Loads and validates a task plan from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the YAML does not match
/// the schema, or validation rejects the plan (empty task list, duplicate
/// task names, empty prompts, and so on).
pub fn load(ctx: &ServiceContext, path: &Path) -> Result<Plan, String> {
    let contents = ctx
        .fs
        .read_to_string(path)
        .map_err(|e| format!("Failed to read spec {}: {e}", path.display()))?;
    let plan: Plan = serde_yaml::from_str(&contents)
        .map_err(|e| format!("Failed to parse spec {}: {e}", path.display()))?;
    plan.validate().map_err(|e| format!("Invalid spec {}: {e}", path.display()))?;
    Ok(plan)
}
