//! Seams between the release logic and the outside world
//!
//! [`VersionControl`] mirrors the handful of git command shapes the workflow
//! needs, one method per shape. [`Host`] covers the clock, the OS user and the
//! URL opener. [`Prompter`] is the interactive part. The binary wires real
//! implementations; tests substitute in-memory fakes.

use chrono::{DateTime, Local};

use crate::error::Result;
use crate::types::{Remote, TagSummary};

/// Version control operations used by the release workflow
pub trait VersionControl {
    /// `git fetch <remote>`
    fn fetch(&self, remote: &str) -> Result<()>;

    /// `git remote -v`, one entry per listed line
    fn remotes(&self) -> Result<Vec<Remote>>;

    /// `git symbolic-ref -q HEAD` without `refs/heads/`; empty when detached
    fn current_branch(&self) -> Result<String>;

    /// `git log --pretty=format:%H <ref> -1`; `None` when the ref does not resolve
    fn commit_sha(&self, reference: &str) -> Result<Option<String>>;

    /// Most recent annotated tag matching `refs/tags/<pattern>-*` by tagger date
    fn last_tag(&self, pattern: &str) -> Result<Option<String>>;

    /// `git diff HEAD --exit-code`; `true` when the working tree matches HEAD
    fn working_tree_clean(&self) -> Result<bool>;

    /// `git tag -a -m <message> <tag> <commit-ish>`
    fn create_annotated_tag(&self, tag: &str, message: &str, target: &str) -> Result<()>;

    /// `git push <remote> <tag>`
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()>;

    /// `git config remote.<name>.url`; `None` when unset
    fn remote_url(&self, remote: &str) -> Result<Option<String>>;

    /// Up to `count` annotated tags matching `refs/tags/<prefix>-*`, newest first
    fn recent_tags(&self, prefix: &str, count: usize) -> Result<Vec<TagSummary>>;

    /// Run `git <args>` with output going straight to the terminal
    fn show_log(&self, args: &[String]) -> Result<()>;
}

/// Process-level facilities outside version control
pub trait Host {
    /// Current local time
    fn now(&self) -> DateTime<Local>;

    /// Name of the OS user running the release
    fn username(&self) -> Result<String>;

    /// Open a URL in the user's browser
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Interactive questions asked during a run
pub trait Prompter {
    /// Ask for free text
    fn ask(&self, question: &str) -> Result<String>;

    /// Ask a yes/no question
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;
}
