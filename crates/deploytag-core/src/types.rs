//! Core types for deploytag

use serde::{Deserialize, Serialize};

/// Branch name reported when HEAD is detached and no branch is configured
pub const DETACHED_HEAD: &str = "HEAD";

/// Which release workflow is being run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseAction {
    /// Cut a new tag from the working branch
    Tag,
    /// Alias an existing tag under a new name
    Retag,
}

impl ReleaseAction {
    /// Returns the string representation of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Retag => "retag",
        }
    }
}

impl std::fmt::Display for ReleaseAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A configured git remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remote {
    /// Remote alias, e.g. `origin`
    pub name: String,
    /// Fetch or push URL
    pub url: String,
}

impl Remote {
    /// Create a new remote entry
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// One annotated tag as shown by `show-tags`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSummary {
    /// Short tag name
    pub name: String,
    /// Tagger email, including angle brackets as git prints it
    pub tagger_email: String,
    /// Tagger date as printed by git
    pub tagger_date: String,
    /// First line of the tag message
    pub subject: String,
}

/// Outcome of a guard that did not abort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardOutcome {
    /// The check ran and held
    Passed,
    /// The check was disabled by configuration and made no git calls
    Skipped,
}

impl GuardOutcome {
    /// Returns the string representation of the outcome
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Skipped => "skipped",
        }
    }
}

/// Result of a tag or retag run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseResult {
    /// Which workflow produced this result
    pub action: ReleaseAction,
    /// The tag that was created and pushed
    pub tag: String,
    /// Commit-ish the tag points at (working branch or source tag)
    pub source: String,
    /// Annotation message written to the tag
    pub message: String,
    /// Remote the tag was pushed to
    pub remote: String,
    /// Ref subsequent deploy steps should use
    pub deploy_ref: String,
}

/// Endpoints of a commit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRange {
    pub from: String,
    pub to: String,
}

impl std::fmt::Display for CommitRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}
