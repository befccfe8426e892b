//! Pre-flight guard checks
//!
//! Both guards either pass, report that they were skipped, or abort the run
//! with a [`GuardViolation`] carrying the commands that fix it.

use tracing::{debug, info, instrument};

use crate::error::{GuardViolation, Result};
use crate::types::GuardOutcome;

use super::session::Session;

/// Working copy must be on the configured branch and match HEAD.
///
/// The branch comparison uses the raw current checkout, not the memoized
/// working branch, which may itself just be the override.
#[instrument(skip(session))]
pub fn guard_committed(session: &mut Session<'_>) -> Result<GuardOutcome> {
    let config = session.config();
    if config.skip_guard_committed {
        info!("skipping guard_committed");
        return Ok(GuardOutcome::Skipped);
    }

    if let Some(configured) = config.branch.as_deref() {
        let actual = session.vcs().current_branch()?;
        if actual != configured {
            return Err(GuardViolation::WrongBranch {
                configured: configured.to_string(),
                actual,
            }
            .into());
        }
    }

    if !session.vcs().working_tree_clean()? {
        return Err(GuardViolation::UncommittedChanges.into());
    }

    debug!("guard_committed passed");
    Ok(GuardOutcome::Passed)
}

/// Local working branch must point at the same commit as its upstream copy
#[instrument(skip(session))]
pub fn guard_upstream(session: &mut Session<'_>) -> Result<GuardOutcome> {
    if session.config().skip_guard_upstream {
        info!("skipping guard_upstream");
        return Ok(GuardOutcome::Skipped);
    }

    session.ensure_fetched()?;
    let remote = session.upstream_remote()?;
    let branch = session.working_branch()?;

    let local = session.local_sha()?;
    let upstream = session
        .vcs()
        .commit_sha(&format!("{}/{}", remote, branch))?;

    debug!(local = ?local, upstream = ?upstream, "comparing branch tips");
    match (local, upstream) {
        (Some(l), Some(u)) if l == u => {
            debug!("guard_upstream passed");
            Ok(GuardOutcome::Passed)
        }
        _ => Err(GuardViolation::OutOfSync { branch, remote }.into()),
    }
}
