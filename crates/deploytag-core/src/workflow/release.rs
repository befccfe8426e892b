//! Tag and retag workflows

use tracing::{info, instrument};

use crate::error::{DeployError, Result};
use crate::types::{GuardOutcome, ReleaseAction, ReleaseResult};

use super::guards::{guard_committed, guard_upstream};
use super::session::Session;

/// Guard results gathered before a tag run mutates anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardReport {
    pub committed: GuardOutcome,
    pub upstream: GuardOutcome,
}

/// Drives one tag or retag run over a [`Session`]
pub struct ReleaseWorkflow<'s, 'a> {
    session: &'s mut Session<'a>,
}

impl<'s, 'a> ReleaseWorkflow<'s, 'a> {
    /// Create a new release workflow
    pub fn new(session: &'s mut Session<'a>) -> Self {
        Self { session }
    }

    /// Run both pre-flight guards
    pub fn guard(&mut self) -> Result<GuardReport> {
        let committed = guard_committed(self.session)?;
        let upstream = guard_upstream(self.session)?;
        Ok(GuardReport {
            committed,
            upstream,
        })
    }

    /// Cut a new annotated tag at the working branch and push it.
    ///
    /// If the push fails the local tag stays behind; nothing is rolled back.
    #[instrument(skip(self))]
    pub fn tag(&mut self) -> Result<ReleaseResult> {
        self.session.ensure_fetched()?;

        let tag = self.session.new_tag_name()?;
        let message = match self.session.release_summary() {
            Some(summary) => summary.to_string(),
            None => default_tag_message(ReleaseAction::Tag, &tag),
        };
        let branch = self.session.working_branch()?;
        let remote = self.session.upstream_remote()?;

        let vcs = self.session.vcs();
        vcs.create_annotated_tag(&tag, &message, &branch)?;
        vcs.push_tag(&remote, &tag)?;

        self.session.set_deploy_ref(tag.clone());
        info!(tag = %tag, branch = %branch, remote = %remote, "tagged and pushed");

        Ok(ReleaseResult {
            action: ReleaseAction::Tag,
            tag: tag.clone(),
            source: branch,
            message,
            remote,
            deploy_ref: tag,
        })
    }

    /// Re-tag an existing release under a new name and push it.
    ///
    /// With `confirm_tag` set the operator must agree before anything is
    /// created; declining ends the run as a cancellation.
    #[instrument(skip(self))]
    pub fn retag(&mut self) -> Result<ReleaseResult> {
        let from = self.session.from_tag()?;
        let to = self.session.new_tag_name()?;

        if self.session.config().confirm_tag {
            let confirmed = self
                .session
                .prompter()
                .confirm(&format!("Do you really want to deploy {}?", from), false)?;
            if !confirmed {
                info!(from = %from, "retag cancelled by user");
                return Err(DeployError::Cancelled);
            }
        }

        let message = retag_message(&from, &to);
        let remote = self.session.upstream_remote()?;

        let vcs = self.session.vcs();
        vcs.create_annotated_tag(&to, &message, &from)?;
        vcs.push_tag(&remote, &to)?;

        self.session.set_deploy_ref(to.clone());
        info!(from = %from, to = %to, remote = %remote, "retagged and pushed");

        Ok(ReleaseResult {
            action: ReleaseAction::Retag,
            tag: to.clone(),
            source: from,
            message,
            remote,
            deploy_ref: to,
        })
    }
}

/// Annotation used when no release summary was collected
pub fn default_tag_message(action: ReleaseAction, tag: &str) -> String {
    format!("deploytag {}: {}", action, tag)
}

/// Annotation for a promoted tag
pub fn retag_message(from: &str, to: &str) -> String {
    format!("tagging {} for deployment as {}", from, to)
}
