//! Live process runner using `std::process::Command`.

use std::path::Path;
use std::process::Command;

use crate::ports::process::{ProcessRunner, RunOutput};

/// Live process runner that spawns real child processes.
///
/// The working directory is set per invocation; the process-wide current
/// directory is never touched.
pub struct LiveProcessRunner;

impl ProcessRunner for LiveProcessRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        workdir: &Path,
    ) -> Result<RunOutput, Box<dyn std::error::Error + Send + Sync>> {
        let output = Command::new(program).args(args).current_dir(workdir).output()?;
        Ok(RunOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
