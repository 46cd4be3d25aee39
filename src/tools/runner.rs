//! Blocking execution of the external binaries
//!
//! Two shapes are supported: a single direct invocation, and a two-stage pipe
//! where the first process's stdout is connected straight to the second
//! process's stdin. Only the second stage of a pipe is bounded by a timeout.

use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::error::{HmmerError, ProcessError};
use crate::Result;

/// Interval between exit checks while a piped stage is running
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A program and its argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new<P: AsRef<Path>>(program: P) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Short program name for messages
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Space-joined command line, for logs only
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    fn spawn(&self, cmd: &mut Command) -> Result<Child> {
        cmd.spawn().map_err(|source| HmmerError::Spawn {
            program: self.program.display().to_string(),
            source,
        })
    }
}

/// Captured output of a successful run
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

#[derive(Debug, Clone)]
pub struct ProcessRunner {
    pipe_timeout: Duration,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_PIPE_TIMEOUT_SECS))
    }
}

impl ProcessRunner {
    pub fn new(pipe_timeout: Duration) -> Self {
        Self { pipe_timeout }
    }

    pub fn pipe_timeout(&self) -> Duration {
        self.pipe_timeout
    }

    /// Run one binary to completion; non-zero exit is an error
    pub fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        tracing::info!(command = %invocation.command_line(), "running");

        let output = invocation
            .command()
            .stdin(Stdio::null())
            .output()
            .map_err(|source| HmmerError::Spawn {
                program: invocation.program.display().to_string(),
                source,
            })?;

        check_status(invocation, output.status, &output.stderr)?;
        Ok(ProcessOutput {
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    /// Run `first | second`, bounding only `second` by the pipe timeout
    ///
    /// The exit status of `first` is reaped but not checked: a failing
    /// extraction shows up as a failure of `second` reading an empty stream.
    pub fn run_piped(&self, first: &Invocation, second: &Invocation) -> Result<ProcessOutput> {
        tracing::info!(
            first = %first.command_line(),
            second = %second.command_line(),
            timeout = ?self.pipe_timeout,
            "running pipeline"
        );

        let mut upstream = {
            let mut cmd = first.command();
            cmd.stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
            first.spawn(&mut cmd)?
        };
        let upstream_err = upstream.stderr.take().map(collect);

        // The Command holding the pipe's read end must be dropped once spawned,
        // otherwise this process keeps the pipe open.
        let spawned = match upstream.stdout.take() {
            Some(pipe) => {
                let mut cmd = second.command();
                cmd.stdin(Stdio::from(pipe))
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
                second.spawn(&mut cmd)
            }
            None => Err(HmmerError::Config(format!(
                "{} stdout was not captured",
                first.program_name()
            ))),
        };
        let mut downstream = match spawned {
            Ok(child) => child,
            Err(e) => {
                reap(&mut upstream, first, upstream_err);
                return Err(e);
            }
        };

        let stdout = downstream.stdout.take().map(collect);
        let stderr = downstream.stderr.take().map(collect);

        let status = match wait_with_timeout(&mut downstream, self.pipe_timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                tracing::warn!(
                    program = %second.program_name(),
                    timeout = ?self.pipe_timeout,
                    "pipeline timed out, killing"
                );
                abandon(&mut downstream, &mut upstream);
                return Err(ProcessError::Timeout {
                    program: second.program_name(),
                    timeout: self.pipe_timeout,
                }
                .into());
            }
            Err(e) => {
                abandon(&mut downstream, &mut upstream);
                return Err(e.into());
            }
        };

        reap(&mut upstream, first, upstream_err);
        let stdout = join(stdout);
        let stderr = join(stderr);

        check_status(second, status, &stderr)?;
        Ok(ProcessOutput { stdout, stderr })
    }
}

/// Kill both stages without waiting on their output streams
///
/// Reader threads are detached: a grandchild that inherited a pipe can keep
/// it open long after the stage itself is gone.
fn abandon(downstream: &mut Child, upstream: &mut Child) {
    downstream.kill().ok();
    downstream.wait().ok();
    upstream.kill().ok();
    upstream.wait().ok();
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= timeout {
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

fn collect<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).ok();
        buf
    })
}

fn join(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

/// Wait for the upstream stage and log a failure instead of raising it
fn reap(child: &mut Child, invocation: &Invocation, stderr: Option<JoinHandle<Vec<u8>>>) {
    let status = child.wait();
    let stderr = join(stderr);
    match status {
        Ok(status) if status.success() => {}
        Ok(status) => tracing::warn!(
            program = %invocation.program_name(),
            code = ?status.code(),
            stderr = %String::from_utf8_lossy(&stderr).trim(),
            "pipeline source exited unsuccessfully"
        ),
        Err(e) => tracing::warn!(
            program = %invocation.program_name(),
            error = %e,
            "failed to reap pipeline source"
        ),
    }
}

fn check_status(invocation: &Invocation, status: ExitStatus, stderr: &[u8]) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    Err(ProcessError::Exit {
        program: invocation.program_name(),
        code: status.code(),
        stderr: String::from_utf8_lossy(stderr).trim().to_string(),
    }
    .into())
}
