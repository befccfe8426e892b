//! deploytag core - release tag naming, guard checks and tag workflows
//!
//! This crate holds everything that decides *what* to do: the typed
//! configuration, the tag template engine, the per-run [`Session`] with its
//! memoized lookups, the pre-flight guards and the tag / retag / commit-log
//! workflows. Talking to git, the OS and the terminal happens behind the
//! traits in [`vcs`].

pub mod config;
pub mod error;
pub mod template;
pub mod types;
pub mod vcs;
pub mod workflow;

pub use error::{ConfigError, DeployError, GitError, GuardViolation, Result};
pub use types::{CommitRange, GuardOutcome, ReleaseAction, ReleaseResult, Remote, TagSummary};
pub use vcs::{Host, Prompter, VersionControl};
pub use workflow::Session;
