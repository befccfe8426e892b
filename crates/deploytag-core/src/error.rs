//! Error types for deploytag

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using DeployError
pub type Result<T> = std::result::Result<T, DeployError>;

/// Main error type for deploytag operations
///
/// Every variant is terminal for the run. Nothing in the workflow retries or
/// rolls back; a half-finished release (tag created, push failed) is reported
/// as-is for a human to clean up.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A pre-flight guard refused to continue
    #[error(transparent)]
    Guard(#[from] GuardViolation),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// User declined an interactive confirmation
    #[error("exiting, user cancelled.")]
    Cancelled,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Override for a key that does not exist
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Tag template references a placeholder nobody can fill
    #[error(
        "Unknown placeholder %{{{name}}} in tag_template '{template}' \
         (expected one of: date, datetime, who, what)"
    )]
    UnknownPlaceholder { name: String, template: String },

    /// A tag lookup that had to succeed came back empty
    #[error("failed: can't find existing tag matching {pattern}-*{}", format_hint(.hint))]
    NoMatchingTag {
        pattern: String,
        hint: Option<String>,
    },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Pre-flight invariants that did not hold
#[derive(Debug, Error)]
pub enum GuardViolation {
    /// Checkout is on a different branch than the configured one
    #[error(
        "failed: guard_committed: wrong branch\n\n    \
         You have configured to deploy from branch ::{configured}::\n    \
         but your git working copy is on branch ::{actual}::\n\n        \
         git checkout {configured}\n\n    \
         and try again. Or, to skip this check, run again with:\n\n        \
         -s skip_guard_committed=true"
    )]
    WrongBranch { configured: String, actual: String },

    /// Working tree differs from HEAD
    #[error(
        "failed: guard_committed: uncommitted changes\n\n    \
         There are files that need to be committed first.\n\n    \
         Or, to skip this check, run again with:\n        \
         -s skip_guard_committed=true"
    )]
    UncommittedChanges,

    /// Local branch tip is not the upstream branch tip
    #[error(
        "failed:\n    \
         Your local {branch} branch is not up to date with {remote}/{branch}.\n    \
         This will likely result in deploying something other than you expect.\n\n    \
         Please make sure you have pulled and pushed all code before deploying:\n\n        \
         git pull {remote} {branch}\n        \
         # run tests, etc\n        \
         git push {remote} {branch}\n\n    \
         Or, to skip this check, run again with -s skip_guard_upstream=true"
    )]
    OutOfSync { branch: String, remote: String },
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// The git executable could not be located
    #[error("git executable not found on PATH: {0}")]
    GitNotFound(String),

    /// Directory is not inside a git working copy
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// A command could not be started at all
    #[error("failed: {command} ({source})")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A ref that had to name a commit did not
    #[error("failed: can't resolve {0} to a commit")]
    UnknownRevision(String),

    /// A command ran and exited non-zero
    #[error("failed: {command}{}", format_stderr(.stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn format_hint(hint: &Option<String>) -> String {
    match hint {
        Some(key) => format!("\n\n    Set one explicitly with -s {}=<tag>", key),
        None => String::new(),
    }
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

impl DeployError {
    /// Whether this error is an intentional cancellation rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
