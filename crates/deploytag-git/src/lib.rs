//! deploytag Git - the `git` command line behind the release workflow
//!
//! Every repository operation shells out to the `git` executable so the
//! operator's own configuration (credentials, hooks, signing) applies
//! unchanged. [`GitRepo`] implements [`VersionControl`]; [`SystemHost`]
//! implements [`Host`](deploytag_core::Host).

mod host;
mod remote;
mod repository;
mod runner;
mod status;
mod tags;

pub use host::SystemHost;
pub use remote::parse_remotes;
pub use repository::{GitRepo, Result};
pub use runner::{render_command, CommandOutput, EchoSink, ShellRunner};
pub use tags::parse_tag_summaries;

use deploytag_core::{Remote, TagSummary, VersionControl};

impl VersionControl for GitRepo {
    fn fetch(&self, remote: &str) -> deploytag_core::Result<()> {
        Ok(self.fetch_remote(remote)?)
    }

    fn remotes(&self) -> deploytag_core::Result<Vec<Remote>> {
        Ok(self.list_remotes()?)
    }

    fn current_branch(&self) -> deploytag_core::Result<String> {
        Ok(self.branch_name()?)
    }

    fn commit_sha(&self, reference: &str) -> deploytag_core::Result<Option<String>> {
        Ok(self.resolve_sha(reference)?)
    }

    fn last_tag(&self, pattern: &str) -> deploytag_core::Result<Option<String>> {
        Ok(self.newest_tag(pattern)?)
    }

    fn working_tree_clean(&self) -> deploytag_core::Result<bool> {
        Ok(self.is_clean()?)
    }

    fn create_annotated_tag(
        &self,
        tag: &str,
        message: &str,
        target: &str,
    ) -> deploytag_core::Result<()> {
        Ok(self.create_tag(tag, message, target)?)
    }

    fn push_tag(&self, remote: &str, tag: &str) -> deploytag_core::Result<()> {
        Ok(self.push_tag_to(remote, tag)?)
    }

    fn remote_url(&self, remote: &str) -> deploytag_core::Result<Option<String>> {
        Ok(self.configured_url(remote)?)
    }

    fn recent_tags(&self, prefix: &str, count: usize) -> deploytag_core::Result<Vec<TagSummary>> {
        Ok(self.list_tags(prefix, count)?)
    }

    fn show_log(&self, args: &[String]) -> deploytag_core::Result<()> {
        Ok(self.runner().run_interactive("git", args)?)
    }
}
