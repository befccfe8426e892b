//! Per-run state shared by guards and release actions

use tracing::{debug, info, instrument};

use crate::config::{Config, DEFAULT_REMOTE};
use crate::error::{ConfigError, Result};
use crate::template::{compose_tag_name, Placeholder, TagTemplate, TemplateValues};
use crate::types::{TagSummary, DETACHED_HEAD};
use crate::vcs::{Host, Prompter, VersionControl};

/// Question asked when the tag template uses `%{what}`
pub const SUMMARY_QUESTION: &str =
    "What does this release introduce? (this will be normalized and used in the tag for this release)";

/// One workflow invocation.
///
/// Holds everything that is looked up at most once per run: the upstream
/// remote, the working branch, whether `git fetch` already ran, and the
/// operator's release summary. A session is created at the start of a
/// command and dropped at the end; nothing survives into the next run.
///
/// The session assumes exclusive use of the checkout. Two runs against the
/// same working copy at once are not detected and may interleave tag and
/// push commands.
pub struct Session<'a> {
    config: &'a Config,
    vcs: &'a dyn VersionControl,
    host: &'a dyn Host,
    prompter: &'a dyn Prompter,
    upstream_remote: Option<String>,
    working_branch: Option<String>,
    fetched: bool,
    release_summary: Option<String>,
    deploy_ref: Option<String>,
}

impl<'a> Session<'a> {
    /// Start a run
    pub fn new(
        config: &'a Config,
        vcs: &'a dyn VersionControl,
        host: &'a dyn Host,
        prompter: &'a dyn Prompter,
    ) -> Self {
        Self {
            config,
            vcs,
            host,
            prompter,
            upstream_remote: None,
            working_branch: None,
            fetched: false,
            release_summary: None,
            deploy_ref: None,
        }
    }

    /// Effective configuration for this run
    pub fn config(&self) -> &'a Config {
        self.config
    }

    pub(crate) fn vcs(&self) -> &'a dyn VersionControl {
        self.vcs
    }

    pub(crate) fn host(&self) -> &'a dyn Host {
        self.host
    }

    pub(crate) fn prompter(&self) -> &'a dyn Prompter {
        self.prompter
    }

    /// Remote alias matching the configured repository URL.
    ///
    /// Falls back to the URL itself when no remote points at it, and to
    /// `origin` when no repository is configured.
    pub fn upstream_remote(&mut self) -> Result<String> {
        if let Some(remote) = &self.upstream_remote {
            return Ok(remote.clone());
        }

        let remote = match self.config.repository.as_deref() {
            Some(url) => {
                let remotes = self.vcs.remotes()?;
                match remotes.into_iter().find(|r| r.url == url) {
                    Some(r) => r.name,
                    None => {
                        debug!(url, "no remote matches repository url, using url directly");
                        url.to_string()
                    }
                }
            }
            None => DEFAULT_REMOTE.to_string(),
        };

        debug!(remote = %remote, "resolved upstream remote");
        self.upstream_remote = Some(remote.clone());
        Ok(remote)
    }

    /// Branch being tagged and deployed: the `branch` override, else the
    /// current checkout, else `HEAD` when detached
    pub fn working_branch(&mut self) -> Result<String> {
        if let Some(branch) = &self.working_branch {
            return Ok(branch.clone());
        }

        let branch = match self.config.branch.as_deref() {
            Some(b) => b.to_string(),
            None => {
                let current = self.vcs.current_branch()?;
                if current.is_empty() {
                    DETACHED_HEAD.to_string()
                } else {
                    current
                }
            }
        };

        debug!(branch = %branch, "resolved working branch");
        self.working_branch = Some(branch.clone());
        Ok(branch)
    }

    /// Fetch from the upstream remote unless this run already did
    #[instrument(skip(self))]
    pub fn ensure_fetched(&mut self) -> Result<()> {
        if self.fetched {
            return Ok(());
        }
        let remote = self.upstream_remote()?;
        self.vcs.fetch(&remote)?;
        self.fetched = true;
        Ok(())
    }

    /// Tip of the working branch
    pub fn local_sha(&mut self) -> Result<Option<String>> {
        let branch = self.working_branch()?;
        self.vcs.commit_sha(&branch)
    }

    /// Most recent annotated tag named `<pattern>-*`, after fetching.
    ///
    /// Only annotated tags carry a tagger date; lightweight tags sort below
    /// all of them and are effectively never returned while an annotated
    /// match exists.
    pub fn find_last_tag(&mut self, pattern: &str) -> Result<Option<String>> {
        self.ensure_fetched()?;
        let tag = self.vcs.last_tag(pattern)?;
        debug!(pattern, tag = ?tag, "looked up last tag");
        Ok(tag)
    }

    /// Same as [`Session::find_last_tag`] but a missing match is fatal
    pub fn require_last_tag(&mut self, pattern: &str, hint: Option<&str>) -> Result<String> {
        self.find_last_tag(pattern)?.ok_or_else(|| {
            ConfigError::NoMatchingTag {
                pattern: pattern.to_string(),
                hint: hint.map(str::to_string),
            }
            .into()
        })
    }

    /// Commit-ish to promote: `from_tag` verbatim, else the last
    /// `from_prefix` tag
    pub fn from_tag(&mut self) -> Result<String> {
        if let Some(tag) = self.config.from_tag.as_deref() {
            return Ok(tag.to_string());
        }
        let prefix = self.config.from_prefix.clone();
        self.require_last_tag(&prefix, Some("from_tag"))
    }

    /// Name for the tag about to be created.
    ///
    /// An explicit `tag` wins outright. Otherwise the template is rendered
    /// against a single clock reading; `%{what}` asks the operator on every
    /// call and keeps the raw answer for the tag message.
    pub fn new_tag_name(&mut self) -> Result<String> {
        if let Some(tag) = self.config.tag.as_deref() {
            return Ok(tag.to_string());
        }

        let template = TagTemplate::parse(&self.config.tag_template)?;
        let mut values = TemplateValues::at(self.host.now());

        if template.uses(Placeholder::Who) {
            values.who = Some(self.host.username()?);
        }
        if template.uses(Placeholder::What) {
            let answer = self.prompter.ask(SUMMARY_QUESTION)?;
            self.release_summary = Some(answer.clone());
            values.what = Some(answer);
        }

        let tag = compose_tag_name(self.config.tag_prefix(), &template.render(&values));
        info!(tag = %tag, template = template.source(), "computed new tag name");
        Ok(tag)
    }

    /// Raw answer to the release summary question, if it was asked
    pub fn release_summary(&self) -> Option<&str> {
        self.release_summary.as_deref()
    }

    /// Annotated tags with the current prefix, newest first
    pub fn show_tags(&self) -> Result<Vec<TagSummary>> {
        self.vcs
            .recent_tags(self.config.tag_prefix(), self.config.show_tags_count)
    }

    /// Ref that later deploy steps should act on
    pub fn deploy_ref(&self) -> Option<&str> {
        self.deploy_ref.as_deref()
    }

    pub(crate) fn set_deploy_ref(&mut self, reference: impl Into<String>) {
        self.deploy_ref = Some(reference.into());
    }
}
