use std::fmt;
use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// One external command invocation: program, arguments, optional working
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<Utf8PathBuf>,
}

impl RunRequest {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl AsRef<Utf8Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// The command line as one string, for diagnostics.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl fmt::Display for RunRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Seam for invoking external processes, so installers and probes can be
/// driven by scripted runners in tests.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the request to completion and return its exit code.
    ///
    /// A process terminated without an exit code (killed by a signal)
    /// reports `-1`. Failing to spawn at all is an `Err`.
    async fn run(&self, request: &RunRequest) -> io::Result<i32>;
}

/// Runs requests with `tokio::process`, capturing output into debug logs
/// so installer noise never reaches the terminal.
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, request: &RunRequest) -> io::Result<i32> {
        debug!("Running `{request}`");

        let mut command = tokio::process::Command::new(&request.program);
        command
            .args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &request.cwd {
            command.current_dir(cwd);
        }

        let output = command.output().await?;
        if !output.stdout.is_empty() {
            debug!(
                "`{}` stdout: {}",
                request.program,
                String::from_utf8_lossy(&output.stdout)
            );
        }
        if !output.stderr.is_empty() {
            debug!(
                "`{}` stderr: {}",
                request.program,
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(output.status.code().unwrap_or(-1))
    }
}
