//! Evaluation dispatch: decides whether an agent attempt counted as success.
//!
//! A pure decision step with no retry logic of its own; retries belong to
//! the execution engine.

use std::path::Path;

use crate::context::ServiceContext;
use crate::judge::{self, Judgment};
use crate::spec::{AgentConfig, Evaluation};

/// The outcome of evaluating one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalOutcome {
    /// The attempt's result is confirmed good.
    Pass,
    /// The attempt's result was rejected; the message says why. Subject
    /// to retry by the engine.
    Fail(String),
    /// The verdict could not be obtained (judgment API failure). Not an
    /// ordinary failure: the engine stops retrying and surfaces this for
    /// manual review.
    Inconclusive(String),
    /// The evaluation cannot run because the plan lacks a required
    /// setting. The plan cannot change mid-run, so the engine stops
    /// retrying immediately.
    Misconfigured(String),
}

/// Runs the declared evaluation for a task inside `workdir`.
///
/// `Test` runs the plan-wide test command; `Command` runs the task's own
/// command and, on zero exit, optionally delegates to the judgment client
/// with the command's stdout as evidence. A non-zero exit short-circuits
/// before any judgment call.
pub async fn evaluate(
    ctx: &ServiceContext,
    agent: &AgentConfig,
    evaluation: &Evaluation,
    workdir: &Path,
) -> EvalOutcome {
    match evaluation {
        Evaluation::Test => {
            let Some(test_command) = &agent.test_command else {
                return EvalOutcome::Misconfigured(
                    "configuration error: evaluation type is 'test' but no test_command is set"
                        .to_string(),
                );
            };
            match run_shell(ctx, test_command, workdir) {
                ShellResult::Ok { .. } => EvalOutcome::Pass,
                ShellResult::NonZero { exit_code, stderr } => EvalOutcome::Fail(format!(
                    "test command exited with code {exit_code}: {}",
                    stderr.trim()
                )),
                ShellResult::LaunchFailed(msg) => {
                    EvalOutcome::Fail(format!("test command could not be launched: {msg}"))
                }
            }
        }
        Evaluation::Command { command, check_prompt } => {
            let stdout = match run_shell(ctx, command, workdir) {
                ShellResult::Ok { stdout } => stdout,
                ShellResult::NonZero { exit_code, stderr } => {
                    return EvalOutcome::Fail(format!(
                        "evaluation command exited with code {exit_code}: {}",
                        stderr.trim()
                    ));
                }
                ShellResult::LaunchFailed(msg) => {
                    return EvalOutcome::Fail(format!(
                        "evaluation command could not be launched: {msg}"
                    ));
                }
            };

            match check_prompt {
                None => EvalOutcome::Pass,
                Some(check) => match judge::judge(ctx, check, &stdout).await {
                    Judgment::Pass => EvalOutcome::Pass,
                    Judgment::Fail { reason } => EvalOutcome::Fail(reason),
                    Judgment::Unavailable { reason } => EvalOutcome::Inconclusive(reason),
                },
            }
        }
    }
}

enum ShellResult {
    Ok { stdout: String },
    NonZero { exit_code: i32, stderr: String },
    LaunchFailed(String),
}

fn run_shell(ctx: &ServiceContext, command: &str, workdir: &Path) -> ShellResult {
    let args = vec!["-c".to_string(), command.to_string()];
    match ctx.runner.run("sh", &args, workdir) {
        Ok(output) if output.success() => ShellResult::Ok { stdout: output.stdout },
        Ok(output) => {
            ShellResult::NonZero { exit_code: output.exit_code, stderr: output.stderr }
        }
        Err(e) => ShellResult::LaunchFailed(e.to_string()),
    }
}
