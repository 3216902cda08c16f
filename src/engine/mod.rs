//! Task execution engine: the bounded retry loop driving the coding agent.
//!
//! Per task the engine acquires an isolated working context, invokes the
//! agent up to the configured number of times, and delegates each clean
//! exit to the evaluator. States per task: pending, attempting, then
//! succeeded or exhausted.

pub mod classify;
pub mod prompt;

use crate::context::ServiceContext;
use crate::evaluate::{self, EvalOutcome};
use crate::spec::{Plan, Task};

pub use classify::{AttemptFailure, ErrorKind};

/// Binary name of the external coding agent.
const AGENT_BINARY: &str = "aider";

/// The final outcome of executing one task.
///
/// Created at the start of a task's execution, updated attempt by
/// attempt, and never mutated after it is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    /// Whether the task ended confirmed successful.
    pub success: bool,
    /// Number of agent invocations made (0 when the retry budget is 0 or
    /// acquisition failed).
    pub attempts: u32,
    /// Last diagnostic message; present iff `success` is false.
    pub error: Option<String>,
    /// Last captured agent stdout, kept regardless of outcome. May be
    /// stale relative to a later failing evaluation attempt.
    pub output: Option<String>,
}

/// One executed task's name paired with its result.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    /// The task's name from the plan.
    pub task_name: String,
    /// The execution result.
    pub result: TaskResult,
}

/// The outcome of one whole run over a plan.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Outcomes for every task that was executed, in plan order.
    pub outcomes: Vec<TaskOutcome>,
    /// Name of the task the run halted on, if any. Tasks after it were
    /// left untouched.
    pub halted_on: Option<String>,
}

impl RunSummary {
    /// Returns `true` if every executed task succeeded and nothing halted
    /// the run.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.halted_on.is_none() && self.outcomes.iter().all(|o| o.result.success)
    }
}

/// Executes one task to completion: acquire the working context, then
/// attempt up to `retries` times.
///
/// A retry budget of 0 yields an immediate exhaustion with zero attempts
/// and no agent invocation. An inconclusive evaluation (judgment API
/// unavailable) or a configuration failure stops the loop without
/// consuming further retries.
///
/// # Errors
///
/// Returns an [`ErrorKind::ResourceAcquisition`] failure when the working
/// context cannot be acquired; no attempts are made in that case.
pub async fn execute_task(
    ctx: &ServiceContext,
    plan: &Plan,
    task: &Task,
    target: &str,
) -> Result<TaskResult, AttemptFailure> {
    let workdir = ctx.workspace.acquire(target).map_err(|e| AttemptFailure {
        kind: ErrorKind::ResourceAcquisition,
        message: format!("failed to acquire working context for '{target}': {e}"),
    })?;

    let built_prompt = prompt::build_prompt(plan, task);
    let args = prompt::agent_args(&plan.agent, &built_prompt);

    let mut attempts = 0u32;
    let mut success = false;
    let mut last_failure: Option<AttemptFailure> = None;
    let mut last_output: Option<String> = None;

    for attempt in 1..=plan.agent.retries {
        attempts = attempt;

        let output = match ctx.runner.run(AGENT_BINARY, &args, &workdir) {
            Ok(output) => output,
            Err(e) => {
                last_failure = Some(classify::classify_launch_failure(&e.to_string()));
                continue;
            }
        };

        // Keep the agent's stdout even when the attempt fails; the
        // lesson pipeline reports it either way.
        last_output = Some(output.stdout.clone());

        if !output.success() {
            last_failure =
                Some(classify::classify_agent_exit(output.exit_code, &output.stderr));
            continue;
        }

        let Some(evaluation) = &task.evaluation else {
            success = true;
            break;
        };

        match evaluate::evaluate(ctx, &plan.agent, evaluation, &workdir).await {
            EvalOutcome::Pass => {
                success = true;
                break;
            }
            EvalOutcome::Fail(message) => {
                last_failure =
                    Some(AttemptFailure { kind: ErrorKind::Evaluation, message });
            }
            EvalOutcome::Inconclusive(message) => {
                // The verdict is unknowable right now; retrying the agent
                // would burn the budget against an unreachable API.
                last_failure = Some(AttemptFailure {
                    kind: ErrorKind::JudgmentInconclusive,
                    message,
                });
            }
            EvalOutcome::Misconfigured(message) => {
                last_failure =
                    Some(AttemptFailure { kind: ErrorKind::Configuration, message });
            }
        }

        if last_failure.as_ref().is_some_and(|f| f.kind.is_terminal()) {
            break;
        }
    }

    let mut last_error = last_failure.map(|f| f.message);
    if !success && last_error.is_none() {
        last_error = Some(format!(
            "retry budget is {}; no attempts were made",
            plan.agent.retries
        ));
    }

    Ok(TaskResult {
        success,
        attempts,
        error: if success { None } else { last_error },
        output: last_output,
    })
}

/// Runs every pending task in plan order, halting at the first task that
/// ends exhausted.
///
/// Tasks already marked `done` are skipped. On confirmed success the
/// task's `done` flag is set here, in memory only. A working-context
/// acquisition failure is recorded as a zero-attempt failed outcome and
/// halts the run like any other task failure.
pub async fn run_plan(ctx: &ServiceContext, plan: &mut Plan, target: &str) -> RunSummary {
    let mut outcomes = Vec::new();
    let mut halted_on = None;

    for idx in 0..plan.tasks.len() {
        if plan.tasks[idx].done {
            continue;
        }
        let task = plan.tasks[idx].clone();

        let result = match execute_task(ctx, plan, &task, target).await {
            Ok(result) => result,
            Err(failure) => TaskResult {
                success: false,
                attempts: 0,
                error: Some(failure.message),
                output: None,
            },
        };

        let succeeded = result.success;
        outcomes.push(TaskOutcome { task_name: task.name.clone(), result });

        if succeeded {
            plan.tasks[idx].done = true;
        } else {
            halted_on = Some(task.name);
            break;
        }
    }

    RunSummary { outcomes, halted_on }
}
