//! Failure taxonomy and best-effort stderr classification.

use std::fmt;

/// Stable classification of why an attempt (or a whole task) failed.
///
/// The stderr substring heuristics feeding this enum are best-effort, not
/// a contract with the external tool; the enum itself is the stable
/// surface callers may branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The plan lacks a setting the evaluation needs. The plan cannot
    /// change mid-run, so this is never retried.
    Configuration,
    /// The external process could not be started at all.
    Launch,
    /// The external process ran but reported failure.
    NonZeroExit,
    /// The process succeeded but evaluation rejected the result.
    Evaluation,
    /// The judgment API could not be reached; the verdict is unknown.
    /// Retrying the agent cannot help, so the retry loop stops here.
    JudgmentInconclusive,
    /// The isolated working context could not be acquired. Fatal for the
    /// task, no attempts are made.
    ResourceAcquisition,
}

impl ErrorKind {
    /// Returns `true` when further agent attempts cannot change the
    /// outcome.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Configuration | Self::JudgmentInconclusive | Self::ResourceAcquisition
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::Launch => "launch",
            Self::NonZeroExit => "non-zero exit",
            Self::Evaluation => "evaluation",
            Self::JudgmentInconclusive => "judgment inconclusive",
            Self::ResourceAcquisition => "resource acquisition",
        };
        f.write_str(name)
    }
}

/// One attempt's failure: classification plus a human-readable cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// Stable failure classification.
    pub kind: ErrorKind,
    /// Human-readable cause for the run report and the lessons log.
    pub message: String,
}

/// Classifies a failed launch of the coding agent.
#[must_use]
pub fn classify_launch_failure(cause: &str) -> AttemptFailure {
    AttemptFailure {
        kind: ErrorKind::Launch,
        message: format!("coding agent could not be launched: {cause}"),
    }
}

/// Derives a cause for a non-zero agent exit from known stderr substrings,
/// falling back to a generic exit-code message.
#[must_use]
pub fn classify_agent_exit(exit_code: i32, stderr: &str) -> AttemptFailure {
    let lowered = stderr.to_lowercase();

    let message = if lowered.contains("command not found") || lowered.contains("no such file") {
        format!("coding agent binary appears to be missing: {}", stderr.trim())
    } else if lowered.contains("api key")
        || lowered.contains("authentication")
        || lowered.contains("unauthorized")
    {
        format!("coding agent authentication failed: {}", stderr.trim())
    } else if lowered.contains("rate limit") || lowered.contains("too many requests") {
        format!("coding agent was rate limited: {}", stderr.trim())
    } else if lowered.contains("timed out") || lowered.contains("timeout") {
        format!("coding agent timed out: {}", stderr.trim())
    } else {
        format!("coding agent exited with code {exit_code}")
    };

    AttemptFailure { kind: ErrorKind::NonZeroExit, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_detected() {
        let failure = classify_agent_exit(127, "sh: aider: command not found\n");
        assert_eq!(failure.kind, ErrorKind::NonZeroExit);
        assert!(failure.message.contains("missing"));
    }

    #[test]
    fn authentication_detected() {
        let failure = classify_agent_exit(1, "Error: invalid API key provided\n");
        assert!(failure.message.contains("authentication"));
    }

    #[test]
    fn rate_limit_detected() {
        let failure = classify_agent_exit(1, "openai.RateLimitError: rate limit exceeded\n");
        assert!(failure.message.contains("rate limited"));
    }

    #[test]
    fn timeout_detected() {
        let failure = classify_agent_exit(1, "request timed out after 600s\n");
        assert!(failure.message.contains("timed out"));
    }

    #[test]
    fn unknown_stderr_falls_back_to_exit_code() {
        let failure = classify_agent_exit(3, "something else entirely\n");
        assert_eq!(failure.message, "coding agent exited with code 3");
    }

    #[test]
    fn only_unretryable_kinds_are_terminal() {
        assert!(ErrorKind::Configuration.is_terminal());
        assert!(ErrorKind::JudgmentInconclusive.is_terminal());
        assert!(ErrorKind::ResourceAcquisition.is_terminal());
        assert!(!ErrorKind::Launch.is_terminal());
        assert!(!ErrorKind::NonZeroExit.is_terminal());
        assert!(!ErrorKind::Evaluation.is_terminal());
    }

    #[test]
    fn launch_failure_keeps_os_reason() {
        let failure = classify_launch_failure("No such file or directory (os error 2)");
        assert_eq!(failure.kind, ErrorKind::Launch);
        assert!(failure.message.contains("os error 2"));
    }
}
