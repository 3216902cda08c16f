//! `drover run` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::engine;
use crate::lessons::{self, ExecutionTelemetry};
use crate::spec;

/// Execute the `run` command: load the spec, execute every pending task,
/// then record lessons.
///
/// # Errors
///
/// Returns an error if the spec cannot be loaded, its name cannot be
/// derived, or the run halts at an exhausted task.
pub fn run(ctx: &ServiceContext, spec_path: &Path) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    runtime.block_on(run_async(ctx, spec_path))
}

async fn run_async(ctx: &ServiceContext, spec_path: &Path) -> Result<(), String> {
    let mut plan = spec::load(ctx, spec_path)?;
    let target = spec_path
        .file_stem()
        .and_then(std::ffi::OsStr::to_str)
        .ok_or_else(|| format!("cannot derive a plan name from {}", spec_path.display()))?
        .to_string();

    let pending = plan.tasks.iter().filter(|t| !t.done).count();
    println!("Plan '{target}': {pending} pending task(s) of {}", plan.tasks.len());

    let summary = engine::run_plan(ctx, &mut plan, &target).await;

    for outcome in &summary.outcomes {
        let status = if outcome.result.success { "ok" } else { "failed" };
        println!(
            "  [{status}] {} ({} attempt(s))",
            outcome.task_name, outcome.result.attempts
        );
    }

    let telemetry: Vec<ExecutionTelemetry> = summary
        .outcomes
        .iter()
        .map(|outcome| ExecutionTelemetry::from_outcome(&target, outcome))
        .collect();
    let recorded = lessons::record_all(ctx, Path::new("."), &telemetry).await;
    println!("Recorded {recorded} lesson(s) to {}", lessons::LESSONS_FILE);

    match (summary.halted_on, summary.outcomes.last()) {
        (Some(task_name), Some(last)) => Err(format!(
            "run halted at task '{task_name}' after {} attempt(s): {}",
            last.result.attempts,
            last.result.error.as_deref().unwrap_or("unknown failure")
        )),
        _ => Ok(()),
    }
}
