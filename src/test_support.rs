//! Shared fake adapters for unit tests.
//!
//! Each fake implements one port trait with scripted or in-memory behavior
//! so components can be exercised without disk, git, subprocesses, or the
//! network. Fakes that tests need to inspect afterwards implement their
//! port for `Arc<Self>`, letting the test keep a handle while the context
//! owns a boxed clone.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::context::ServiceContext;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::llm::{
    CompletionError, CompletionFuture, CompletionRequest, CompletionResponse, LlmClient,
};
use crate::ports::process::{ProcessRunner, RunOutput};
use crate::ports::workspace::Workspace;

/// Clock that always returns the same instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// A fixed clock at 2025-06-15T10:30:00Z.
    #[must_use]
    pub fn default_instant() -> Self {
        Self(Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// In-memory filesystem keyed by exact path.
pub struct MemFs {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemFs {
    /// Creates an empty in-memory filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self { files: Mutex::new(HashMap::new()) }
    }

    /// Seeds a file with the given contents.
    pub fn put(&self, path: &Path, contents: &str) {
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
    }

    /// Returns a file's contents, if present.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

impl Default for MemFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MemFs {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.put(path, contents);
        Ok(())
    }

    fn append(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut files = self.files.lock().unwrap();
        files.entry(path.to_path_buf()).or_default().push_str(contents);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

impl FileSystem for Arc<MemFs> {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.as_ref().read_to_string(path)
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.as_ref().write(path, contents)
    }

    fn append(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.as_ref().append(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        self.as_ref().exists(path)
    }
}

/// Filesystem whose `append` always fails, for write-error paths.
pub struct FailingAppendFs {
    inner: MemFs,
}

impl FailingAppendFs {
    /// Creates a failing-append filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self { inner: MemFs::new() }
    }
}

impl Default for FailingAppendFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for FailingAppendFs {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.inner.read_to_string(path)
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.inner.write(path, contents)
    }

    fn append(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Err("disk full".into())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }
}

/// A scripted outcome for one `ProcessRunner::run` call.
pub type ScriptedRun = Result<RunOutput, String>;

/// Process runner that replays a fixed script of outcomes, in order,
/// recording every invocation.
pub struct ScriptedRunner {
    script: Mutex<VecDeque<ScriptedRun>>,
    calls: Mutex<Vec<(String, Vec<String>, PathBuf)>>,
}

/// Builds a scripted `Ok` outcome.
#[must_use]
pub fn run_ok(exit_code: i32, stdout: &str, stderr: &str) -> ScriptedRun {
    Ok(RunOutput {
        exit_code,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    })
}

/// Builds a scripted launch failure.
#[must_use]
pub fn run_launch_err(message: &str) -> ScriptedRun {
    Err(message.to_string())
}

impl ScriptedRunner {
    /// Creates a runner that will yield the given outcomes in order.
    #[must_use]
    pub fn new(script: Vec<ScriptedRun>) -> Self {
        Self { script: Mutex::new(script.into()), calls: Mutex::new(Vec::new()) }
    }

    /// Number of `run` calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Snapshot of all invocations: `(program, args, workdir)`.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, Vec<String>, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessRunner for Arc<ScriptedRunner> {
    fn run(
        &self,
        program: &str,
        args: &[String],
        workdir: &Path,
    ) -> Result<RunOutput, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.lock().unwrap().push((
            program.to_string(),
            args.to_vec(),
            workdir.to_path_buf(),
        ));
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("ScriptedRunner: unexpected call to '{program}'"));
        next.map_err(Into::into)
    }
}

/// Workspace that hands out paths under a fixed root, recording acquires.
pub struct FakeWorkspace {
    root: PathBuf,
    fail_with: Option<String>,
    acquires: Mutex<Vec<String>>,
    releases: Mutex<Vec<String>>,
}

impl FakeWorkspace {
    /// Creates a workspace rooted at `/worktrees`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/worktrees"),
            fail_with: None,
            acquires: Mutex::new(Vec::new()),
            releases: Mutex::new(Vec::new()),
        }
    }

    /// Creates a workspace whose `acquire` always fails with `message`.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self { fail_with: Some(message.to_string()), ..Self::new() }
    }

    /// Targets acquired so far, in order.
    #[must_use]
    pub fn acquired(&self) -> Vec<String> {
        self.acquires.lock().unwrap().clone()
    }

    /// Targets released so far, in order.
    #[must_use]
    pub fn released(&self) -> Vec<String> {
        self.releases.lock().unwrap().clone()
    }
}

impl Default for FakeWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace for Arc<FakeWorkspace> {
    fn acquire(&self, target: &str) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(message) = &self.fail_with {
            return Err(message.clone().into());
        }
        self.acquires.lock().unwrap().push(target.to_string());
        Ok(self.root.join(target))
    }

    fn release(&self, target: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.releases.lock().unwrap().push(target.to_string());
        Ok(())
    }
}

/// A scripted outcome for one `LlmClient::complete` call.
pub type ScriptedCompletion = Result<String, CompletionError>;

/// LLM client that replays scripted replies, recording every request.
pub struct StaticLlm {
    replies: Mutex<VecDeque<ScriptedCompletion>>,
    default_reply: Mutex<Option<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StaticLlm {
    /// Creates a client that will yield the given replies in order.
    #[must_use]
    pub fn new(replies: Vec<ScriptedCompletion>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            default_reply: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A client that always answers with the same text.
    #[must_use]
    pub fn always(reply: &str) -> Self {
        let client = Self::new(Vec::new());
        *client.default_reply.lock().unwrap() = Some(reply.to_string());
        client
    }

    /// Snapshot of all completion requests made so far.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of completion calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl LlmClient for Arc<StaticLlm> {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        let default = self.default_reply.lock().unwrap().clone();
        Box::pin(async move {
            match next {
                Some(Ok(text)) => Ok(CompletionResponse { text }),
                Some(Err(e)) => Err(e),
                None => match default {
                    Some(text) => Ok(CompletionResponse { text }),
                    None => panic!("StaticLlm: unexpected completion call"),
                },
            }
        })
    }
}

// --- Panicking fallbacks for ports a test does not exercise ---

struct PanickingRunner;
impl ProcessRunner for PanickingRunner {
    fn run(
        &self,
        program: &str,
        _args: &[String],
        _workdir: &Path,
    ) -> Result<RunOutput, Box<dyn std::error::Error + Send + Sync>> {
        panic!("ProcessRunner not configured for this test (call to '{program}')");
    }
}

struct PanickingWorkspace;
impl Workspace for PanickingWorkspace {
    fn acquire(&self, target: &str) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
        panic!("Workspace not configured for this test (acquire '{target}')");
    }

    fn release(&self, target: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("Workspace not configured for this test (release '{target}')");
    }
}

struct PanickingLlm;
impl LlmClient for PanickingLlm {
    fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
        panic!("LlmClient not configured for this test");
    }
}

/// Context with a fixed clock, empty in-memory fs, and panicking fakes for
/// every other port. Tests replace the fields they exercise.
#[must_use]
pub fn test_context() -> ServiceContext {
    ServiceContext {
        clock: Box::new(FixedClock::default_instant()),
        fs: Box::new(MemFs::new()),
        runner: Box::new(PanickingRunner),
        workspace: Box::new(PanickingWorkspace),
        llm: Box::new(PanickingLlm),
    }
}

/// Context backed by the given in-memory filesystem.
#[must_use]
pub fn context_with_fs(fs: MemFs) -> ServiceContext {
    let mut ctx = test_context();
    ctx.fs = Box::new(fs);
    ctx
}
