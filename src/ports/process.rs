//! Process runner port for launching external commands.

use std::path::Path;

/// The captured output of a finished external process.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// The exit code of the process.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

impl RunOutput {
    /// Returns `true` if the process exited with code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Launches external commands and captures their output.
///
/// A non-zero exit code is a normal, expected outcome returned as `Ok`,
/// left to callers to interpret. `Err` is reserved for launch failures (binary
/// missing, permission denied), carrying the underlying OS-level reason.
///
/// The working directory is an explicit parameter: implementations must
/// never change the process-wide current directory.
pub trait ProcessRunner: Send + Sync {
    /// Runs `program` with `args` in `workdir`, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error only when the process cannot be started at all.
    fn run(
        &self,
        program: &str,
        args: &[String],
        workdir: &Path,
    ) -> Result<RunOutput, Box<dyn std::error::Error + Send + Sync>>;
}
