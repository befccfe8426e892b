//! Subprocess execution with echo and exit-code mapping

use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use console::style;
use tracing::{debug, info};

use deploytag_core::GitError;

use crate::repository::Result;

/// Captured result of a finished command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Command line as it was echoed
    pub command: String,
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Whether the command exited zero
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a non-zero exit into [`GitError::CommandFailed`]
    pub fn check(self) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(GitError::CommandFailed {
                command: self.command,
                code: self.code,
                stderr: self.stderr,
            })
        }
    }
}

/// Runs external commands from a fixed working directory.
///
/// Mutating commands are echoed as `executing locally: ...` before they
/// start so the operator sees exactly what touched the repository. The echo
/// goes to stderr unless another sink is given.
#[derive(Clone)]
pub struct ShellRunner {
    dir: PathBuf,
    echo: Option<EchoSink>,
}

/// Where `executing locally` lines are written
pub type EchoSink = Arc<Mutex<dyn Write + Send>>;

fn stderr_sink() -> EchoSink {
    Arc::new(Mutex::new(std::io::stderr()))
}

impl fmt::Debug for ShellRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellRunner")
            .field("dir", &self.dir)
            .field("echo", &self.echo.is_some())
            .finish()
    }
}

impl ShellRunner {
    /// Runner rooted at `dir` echoing to stderr
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            echo: Some(stderr_sink()),
        }
    }

    /// Toggle echoing of mutating commands
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = match (echo, self.echo.take()) {
            (false, _) => None,
            (true, Some(sink)) => Some(sink),
            (true, None) => Some(stderr_sink()),
        };
        self
    }

    /// Send the echo somewhere other than stderr
    pub fn with_echo_sink(mut self, sink: EchoSink) -> Self {
        self.echo = Some(sink);
        self
    }

    /// Whether mutating commands are echoed
    pub fn echoes(&self) -> bool {
        self.echo.is_some()
    }

    /// Run and capture output; exit status is left to the caller
    pub fn run<S: AsRef<str>>(&self, program: &str, args: &[S]) -> Result<CommandOutput> {
        let command = render_command(program, args);
        let start = Instant::now();

        let output = self
            .command(program, args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        let out = CommandOutput {
            command,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        };
        debug!(
            command = %out.command,
            code = ?out.code,
            duration_ms = start.elapsed().as_millis(),
            "ran command"
        );
        Ok(out)
    }

    /// Echo, run, and fail on a non-zero exit
    pub fn run_checked<S: AsRef<str>>(&self, program: &str, args: &[S]) -> Result<CommandOutput> {
        self.announce(program, args);
        let start = Instant::now();
        let out = self.run(program, args)?.check()?;
        info!(
            command = %out.command,
            duration_ms = start.elapsed().as_millis(),
            "command succeeded"
        );
        Ok(out)
    }

    /// Echo and run with the terminal attached
    pub fn run_interactive<S: AsRef<str>>(&self, program: &str, args: &[S]) -> Result<()> {
        self.announce(program, args);
        let command = render_command(program, args);

        let status = self
            .command(program, args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(GitError::CommandFailed {
                command,
                code: status.code(),
                stderr: String::new(),
            })
        }
    }

    fn command<S: AsRef<str>>(&self, program: &str, args: &[S]) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(args.iter().map(AsRef::as_ref)).current_dir(&self.dir);
        cmd
    }

    fn announce<S: AsRef<str>>(&self, program: &str, args: &[S]) {
        let Some(sink) = &self.echo else {
            return;
        };
        // a poisoned or broken sink must not stop the command
        if let Ok(mut out) = sink.lock() {
            let _ = writeln!(
                out,
                "    {} {}",
                style("executing locally:").dim(),
                render_command(program, args)
            );
        }
    }
}

/// Shell-style rendering of a command line for echo and error messages
pub fn render_command<S: AsRef<str>>(program: &str, args: &[S]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(AsRef::as_ref))
        .map(quote_arg)
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,^~{}".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
