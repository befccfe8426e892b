//! CLI commands

mod commit_log;
mod completions;
mod config;
mod guard;
mod init;
mod release;
mod show_tags;

pub use commit_log::CommitLogCommand;
pub use completions::CompletionsCommand;
pub use config::ConfigCommand;
pub use guard::{GuardCommand, GuardSelection};
pub use init::InitCommand;
pub use release::{RetagCommand, TagCommand};
pub use show_tags::ShowTagsCommand;
