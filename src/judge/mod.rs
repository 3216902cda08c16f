//! Yes/no judgment over the LLM completion port.
//!
//! Turns a check prompt plus evidence text into a boolean verdict. The
//! reply is normalized strictly first (exact `yes`/`no`), then by
//! best-effort keyword matching; an API failure is a distinct
//! [`Judgment::Unavailable`] outcome, never a yes or a no.

use std::fmt::Write as _;

use crate::context::ServiceContext;
use crate::ports::llm::CompletionRequest;

/// Model used for judgment and lesson-generation completions.
pub const COMPLETION_MODEL: &str = "claude-sonnet-4-20250514";

const JUDGE_MAX_TOKENS: u32 = 64;

const JUDGE_SYSTEM: &str = "You are a strict evaluator of automated task results. \
Answer questions with exactly one word: yes or no.";

/// Keywords accepted as affirmative when the reply is not an exact yes/no.
const AFFIRMATIVE_KEYWORDS: [&str; 4] = ["yes", "pass", "succeed", "correct"];

/// Longest slice of an ambiguous reply quoted back in an error message.
const REPLY_QUOTE_LIMIT: usize = 120;

/// The outcome of a judgment call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Judgment {
    /// The model affirmed the check.
    Pass,
    /// The model denied the check, or the reply matched no affirmative
    /// keyword.
    Fail {
        /// Why the judgment counted as a failure.
        reason: String,
    },
    /// The completion call itself failed; the verdict is unknown and the
    /// result needs manual review. Not a task failure.
    Unavailable {
        /// What went wrong and what to do about it.
        reason: String,
    },
}

/// Asks the language model whether `evidence` satisfies `check_prompt`.
pub async fn judge(ctx: &ServiceContext, check_prompt: &str, evidence: &str) -> Judgment {
    let request = CompletionRequest {
        model: COMPLETION_MODEL.to_string(),
        system: JUDGE_SYSTEM.to_string(),
        prompt: build_prompt(check_prompt, evidence),
        max_tokens: JUDGE_MAX_TOKENS,
    };

    match ctx.llm.complete(&request).await {
        Ok(response) => normalize(&response.text),
        Err(e) => Judgment::Unavailable {
            reason: format!(
                "judgment call failed ({e}); could not evaluate the result, review it manually"
            ),
        },
    }
}

fn build_prompt(check_prompt: &str, evidence: &str) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "Question: {check_prompt}");
    prompt.push_str("\nEvidence:\n");
    prompt.push_str(evidence);
    prompt.push_str("\n\nAnswer with exactly one word: yes or no.\n");
    prompt
}

/// Normalizes a raw model reply into a verdict.
///
/// Exact `yes`/`no` after lowercasing and trimming wins; otherwise any
/// affirmative keyword anywhere in the reply counts as a pass. This is a
/// best-effort fallback, not a strict parse.
fn normalize(raw: &str) -> Judgment {
    let normalized = raw.trim().to_lowercase();

    if normalized == "yes" {
        return Judgment::Pass;
    }
    if normalized == "no" {
        return Judgment::Fail { reason: "judgment answered no".to_string() };
    }
    if AFFIRMATIVE_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        return Judgment::Pass;
    }

    Judgment::Fail {
        reason: format!("ambiguous judgment reply: \"{}\"", truncate(raw.trim())),
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= REPLY_QUOTE_LIMIT {
        text.to_string()
    } else {
        let cut: String = text.chars().take(REPLY_QUOTE_LIMIT).collect();
        format!("{cut}...")
    }
}
