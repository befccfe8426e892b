//! Branch and working tree status

use deploytag_core::GitError;

use crate::repository::{GitRepo, Result};

const HEADS_PREFIX: &str = "refs/heads/";

impl GitRepo {
    /// Checked-out branch name, empty when HEAD is detached
    pub fn branch_name(&self) -> Result<String> {
        let out = self.git(&["symbolic-ref", "-q", "HEAD"])?;
        // exit 1 means detached
        let full = out.stdout.trim();
        Ok(full.strip_prefix(HEADS_PREFIX).unwrap_or(full).to_string())
    }

    /// Full SHA a ref resolves to
    pub fn resolve_sha(&self, reference: &str) -> Result<Option<String>> {
        let out = self.git(&["log", "--pretty=format:%H", reference, "-1"])?;
        let sha = out.stdout.trim();
        Ok((out.success() && !sha.is_empty()).then(|| sha.to_string()))
    }

    /// Whether tracked files match HEAD
    pub fn is_clean(&self) -> Result<bool> {
        let out = self.git(&["diff", "HEAD", "--exit-code"])?;
        match out.code {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(GitError::CommandFailed {
                command: out.command,
                code: out.code,
                stderr: out.stderr,
            }),
        }
    }
}
