//! Git working copy handle

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use deploytag_core::GitError;

use crate::runner::{CommandOutput, ShellRunner};

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// A git working copy driven through the `git` executable
#[derive(Debug, Clone)]
pub struct GitRepo {
    path: PathBuf,
    runner: ShellRunner,
}

impl GitRepo {
    /// Open the working copy containing `start_path`.
    ///
    /// Fails with [`GitError::GitNotFound`] when `git` is not on `PATH` and
    /// with [`GitError::NotARepository`] when `start_path` is outside any
    /// working copy.
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        which::which("git").map_err(|e| GitError::GitNotFound(e.to_string()))?;

        let query = ShellRunner::new(start_path).with_echo(false);
        let out = query.run("git", &["rev-parse", "--show-toplevel"])?;
        if !out.success() {
            return Err(GitError::NotARepository(start_path.to_path_buf()));
        }

        let path = PathBuf::from(out.stdout.trim());
        info!(path = %path.display(), "discovered git repository");
        Ok(Self {
            runner: ShellRunner::new(&path),
            path,
        })
    }

    /// Turn the `executing locally` echo on or off
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.runner = self.runner.with_echo(echo);
        self
    }

    /// Whether mutating git commands are echoed
    pub fn echoes(&self) -> bool {
        self.runner.echoes()
    }

    /// Top level of the working copy
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Query git without echo; the caller interprets the exit code
    pub(crate) fn git(&self, args: &[&str]) -> Result<CommandOutput> {
        self.runner.run("git", args)
    }

    /// Mutate through git with echo; non-zero exit is an error
    pub(crate) fn git_checked(&self, args: &[&str]) -> Result<CommandOutput> {
        self.runner.run_checked("git", args)
    }

    pub(crate) fn runner(&self) -> &ShellRunner {
        &self.runner
    }
}
