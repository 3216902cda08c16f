//! Lesson pipeline: turns execution telemetry into a persistent log of
//! natural-language lessons.
//!
//! Each record becomes one Markdown section appended to `LESSONS.md`. A
//! single record's failure (missing fields, API error, write error) never
//! aborts the batch; the pipeline degrades to fallback text or skips the
//! append and moves on.

use std::fmt::Write as _;
use std::path::Path;

use crate::context::ServiceContext;
use crate::engine::TaskOutcome;
use crate::judge::COMPLETION_MODEL;
use crate::ports::llm::CompletionRequest;

/// Name of the lessons log file under the target root.
pub const LESSONS_FILE: &str = "LESSONS.md";

/// Header written once when the log file is created.
const LOG_HEADER: &str = "# Lessons Learned\n\n\
Notes generated after each automated task execution. Newest entries last.\n\n";

const LESSON_SYSTEM: &str = "You are a retrospective assistant for automated coding runs. \
Given the telemetry of one task execution, write one concise, actionable lesson.";

const LESSON_MAX_TOKENS: u32 = 512;

/// A flattened snapshot of one task's execution, consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionTelemetry {
    /// Name of the plan the task belonged to.
    pub spec_name: String,
    /// Name of the task.
    pub task_name: String,
    /// Number of execution attempts made.
    pub attempts: u32,
    /// Whether the task ended successful.
    pub success: bool,
    /// Final diagnostic message, when the task failed.
    pub error: Option<String>,
    /// Last captured agent stdout.
    pub output: Option<String>,
}

impl ExecutionTelemetry {
    /// Builds a telemetry record from an engine outcome.
    #[must_use]
    pub fn from_outcome(spec_name: &str, outcome: &TaskOutcome) -> Self {
        Self {
            spec_name: spec_name.to_string(),
            task_name: outcome.task_name.clone(),
            attempts: outcome.result.attempts,
            success: outcome.result.success,
            error: outcome.result.error.clone(),
            output: outcome.result.output.clone(),
        }
    }
}

/// Generates and appends one lesson per telemetry record, in input order.
///
/// Returns the number of records successfully appended to the log at
/// `<root>/LESSONS.md`.
pub async fn record_all(
    ctx: &ServiceContext,
    root: &Path,
    records: &[ExecutionTelemetry],
) -> usize {
    let log_path = root.join(LESSONS_FILE);
    let mut appended = 0;

    for record in records {
        let lesson = lesson_text(ctx, record).await;
        let section = format_section(ctx, record, &lesson);

        if !ctx.fs.exists(&log_path) {
            if let Err(e) = ctx.fs.append(&log_path, LOG_HEADER) {
                eprintln!("Warning: could not create lessons log: {e}");
                continue;
            }
        }
        match ctx.fs.append(&log_path, &section) {
            Ok(()) => appended += 1,
            Err(e) => eprintln!(
                "Warning: could not append lesson for task '{}': {e}",
                record.task_name
            ),
        }
    }

    appended
}

/// Produces the lesson body for one record: generated text, a fallback on
/// API failure, or a skip notice when identifying fields are missing.
async fn lesson_text(ctx: &ServiceContext, record: &ExecutionTelemetry) -> String {
    if record.spec_name.trim().is_empty() || record.task_name.trim().is_empty() {
        return "Lesson skipped: telemetry record is missing its spec or task name."
            .to_string();
    }

    let request = CompletionRequest {
        model: COMPLETION_MODEL.to_string(),
        system: LESSON_SYSTEM.to_string(),
        prompt: build_lesson_prompt(record),
        max_tokens: LESSON_MAX_TOKENS,
    };

    match ctx.llm.complete(&request).await {
        Ok(response) => response.text.trim().to_string(),
        Err(e) => format!(
            "Lesson generation failed ({e}). Outcome: {} after {}.",
            outcome_phrase(record),
            attempts_phrase(record.attempts)
        ),
    }
}

fn build_lesson_prompt(record: &ExecutionTelemetry) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "Spec: {}", record.spec_name);
    let _ = writeln!(prompt, "Task: {}", record.task_name);
    let _ = writeln!(
        prompt,
        "Result: {} after {}",
        outcome_phrase(record),
        attempts_phrase(record.attempts)
    );
    if let Some(error) = &record.error {
        let _ = writeln!(prompt, "Last error: {error}");
    }
    if let Some(output) = &record.output {
        let _ = writeln!(prompt, "\nAgent output:\n{output}");
    }
    prompt.push_str(
        "\nWrite a concise, actionable lesson (under 200 words) about this execution \
that would help plan similar tasks better next time.\n",
    );
    prompt
}

/// Formats one record as a Markdown section with heading, bullet fields,
/// lesson body, and a horizontal-rule separator.
fn format_section(ctx: &ServiceContext, record: &ExecutionTelemetry, lesson: &str) -> String {
    let spec_name =
        if record.spec_name.trim().is_empty() { "unknown" } else { record.spec_name.as_str() };
    let task_name =
        if record.task_name.trim().is_empty() { "unknown" } else { record.task_name.as_str() };
    let timestamp = ctx.clock.now().to_rfc3339();

    let mut section = String::new();
    let _ = writeln!(section, "## {spec_name} - {timestamp}");
    section.push('\n');
    let _ = writeln!(section, "- Task: {task_name}");
    let _ = writeln!(
        section,
        "- Outcome: {} after {}",
        outcome_phrase(record),
        attempts_phrase(record.attempts)
    );
    section.push('\n');
    section.push_str(lesson.trim());
    section.push_str("\n\n---\n\n");
    section
}

fn outcome_phrase(record: &ExecutionTelemetry) -> &'static str {
    if record.success {
        "succeeded"
    } else {
        "failed"
    }
}

fn attempts_phrase(attempts: u32) -> String {
    if attempts == 1 {
        "1 attempt".to_string()
    } else {
        format!("{attempts} attempts")
    }
}
