//! Commit log between release points

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::{GitError, Result};
use crate::types::CommitRange;

use super::session::Session;

static GITHUB_REMOTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:git@github\.com:|ssh://git@github\.com/|https://github\.com/)([^/]+)/(.+?)(?:\.git)?/?$",
    )
    .expect("Invalid regex")
});

/// Number of hex digits of the local SHA used as the range end
pub const SHORT_SHA_LEN: usize = 8;

/// How a commit range is shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LogDisplay {
    /// Open the hosting provider's compare page
    Browser { url: String },
    /// `git <custom words> <from>..<to>`
    Custom { args: Vec<String> },
    /// `git log <from>..<to>`
    Plain { args: Vec<String> },
}

/// Endpoints of the log for the current stage.
///
/// For `production` the range runs from the tag being promoted to the last
/// release tag. Everywhere else it runs from the last release tag to the
/// working branch tip.
#[instrument(skip(session))]
pub fn commit_range(session: &mut Session<'_>) -> Result<CommitRange> {
    let config = session.config();
    let range = if config.is_production() {
        let from = session.from_tag()?;
        let to = session.require_last_tag(config.tag_prefix(), None)?;
        CommitRange { from, to }
    } else {
        let from = session.require_last_tag(config.tag_prefix(), None)?;
        let branch = session.working_branch()?;
        let sha = session
            .local_sha()?
            .ok_or(GitError::UnknownRevision(branch))?;
        CommitRange {
            from,
            to: sha.chars().take(SHORT_SHA_LEN).collect(),
        }
    };
    debug!(range = %range, "computed commit range");
    Ok(range)
}

/// Compare URL for a GitHub remote, `None` for anything else
pub fn github_compare_url(remote_url: &str, range: &CommitRange) -> Option<String> {
    let caps = GITHUB_REMOTE_REGEX.captures(remote_url.trim())?;
    Some(format!(
        "https://github.com/{}/{}/compare/{}...{}",
        &caps[1], &caps[2], range.from, range.to
    ))
}

/// Pick the display for a range.
///
/// The browser wins when enabled and the remote is on GitHub, then a
/// non-blank custom log command, then plain `git log`.
pub fn plan_display(
    range: &CommitRange,
    browser_compare: bool,
    remote_url: Option<&str>,
    custom_command: Option<&str>,
) -> LogDisplay {
    if browser_compare {
        if let Some(url) = remote_url.and_then(|u| github_compare_url(u, range)) {
            return LogDisplay::Browser { url };
        }
    }

    let range_arg = range.to_string();
    match custom_command.map(str::trim).filter(|c| !c.is_empty()) {
        Some(custom) => {
            let mut args: Vec<String> = custom.split_whitespace().map(str::to_string).collect();
            args.push(range_arg);
            LogDisplay::Custom { args }
        }
        None => LogDisplay::Plain {
            args: vec!["log".to_string(), range_arg],
        },
    }
}

/// Work out the range and how it will be shown, without showing it
#[instrument(skip(session))]
pub fn plan_commit_log(session: &mut Session<'_>) -> Result<(CommitRange, LogDisplay)> {
    let range = commit_range(session)?;
    let config = session.config();

    let remote_url = if config.browser_compare {
        let remote = session.upstream_remote()?;
        // an unnamed remote is already the URL
        session
            .vcs()
            .remote_url(&remote)?
            .or_else(|| config.repository.clone().filter(|url| *url == remote))
    } else {
        None
    };

    let plan = plan_display(
        &range,
        config.browser_compare,
        remote_url.as_deref(),
        config.git_log_command.as_deref(),
    );
    debug!(range = %range, plan = ?plan, "planned commit log");
    Ok((range, plan))
}

/// Open the compare page or run the log command
pub fn display_commit_log(session: &Session<'_>, plan: &LogDisplay) -> Result<()> {
    info!(plan = ?plan, "showing commit log");
    match plan {
        LogDisplay::Browser { url } => session.host().open_url(url),
        LogDisplay::Custom { args } | LogDisplay::Plain { args } => session.vcs().show_log(args),
    }
}

/// Work out the range and display, then show it
pub fn show_commit_log(session: &mut Session<'_>) -> Result<(CommitRange, LogDisplay)> {
    let (range, plan) = plan_commit_log(session)?;
    display_commit_log(session, &plan)?;
    Ok((range, plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::workflow::testing::{FakeHost, FakePrompter, FakeVcs};

    fn range(from: &str, to: &str) -> CommitRange {
        CommitRange {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn test_range_outside_production() {
        let config = Config {
            stage: Some("staging".to_string()),
            ..Config::default()
        };
        let vcs = FakeVcs::default()
            .with_tag("staging-a", "c1", 1)
            .with_tag("staging-b", "c2", 2)
            .with_sha("main", "0123456789abcdef0123456789abcdef01234567");
        let (host, prompter) = (FakeHost::default(), FakePrompter::default());
        let mut session = Session::new(&config, &vcs, &host, &prompter);

        assert_eq!(
            commit_range(&mut session).unwrap(),
            range("staging-b", "01234567")
        );
    }

    #[test]
    fn test_range_in_production() {
        let config = Config {
            stage: Some("production".to_string()),
            ..Config::default()
        };
        let vcs = FakeVcs::default()
            .with_tag("staging-a", "c1", 1)
            .with_tag("staging-b", "c2", 4)
            .with_tag("production-a", "c1", 3);
        let (host, prompter) = (FakeHost::default(), FakePrompter::default());
        let mut session = Session::new(&config, &vcs, &host, &prompter);

        assert_eq!(
            commit_range(&mut session).unwrap(),
            range("staging-b", "production-a")
        );
        assert_eq!(vcs.count_calls("fetch"), 1);
    }

    #[test]
    fn test_range_without_release_tag_fails() {
        let config = Config::default();
        let vcs = FakeVcs::default().with_sha("main", &"a".repeat(40));
        let (host, prompter) = (FakeHost::default(), FakePrompter::default());
        let mut session = Session::new(&config, &vcs, &host, &prompter);

        let err = commit_range(&mut session).unwrap_err();
        assert!(err.to_string().contains("deploy-*"));
    }

    #[test]
    fn test_github_compare_url() {
        let r = range("staging-a", "production-b");
        assert_eq!(
            github_compare_url("git@github.com:acme/shop.git", &r).as_deref(),
            Some("https://github.com/acme/shop/compare/staging-a...production-b")
        );
        assert_eq!(
            github_compare_url("https://github.com/acme/shop", &r).as_deref(),
            Some("https://github.com/acme/shop/compare/staging-a...production-b")
        );
        assert_eq!(github_compare_url("git@gitlab.com:acme/shop.git", &r), None);
    }

    #[test]
    fn test_plan_prefers_browser_when_enabled() {
        let r = range("a", "b");
        let display = plan_display(&r, true, Some("git@github.com:o/r.git"), Some("lg"));
        assert_eq!(
            display,
            LogDisplay::Browser {
                url: "https://github.com/o/r/compare/a...b".to_string()
            }
        );
    }

    #[test]
    fn test_plan_custom_command() {
        let r = range("a", "b");
        let display = plan_display(&r, false, Some("git@github.com:o/r.git"), Some(" log --oneline "));
        assert_eq!(
            display,
            LogDisplay::Custom {
                args: vec!["log".into(), "--oneline".into(), "a..b".into()]
            }
        );
    }

    #[test]
    fn test_plan_falls_back_to_plain() {
        let r = range("a", "b");
        let plain = LogDisplay::Plain {
            args: vec!["log".into(), "a..b".into()],
        };
        assert_eq!(plan_display(&r, false, None, None), plain);
        assert_eq!(plan_display(&r, false, None, Some("   ")), plain);
        assert_eq!(
            plan_display(&r, true, Some("git@gitlab.com:o/r.git"), None),
            plain
        );
    }

    #[test]
    fn test_show_commit_log_opens_browser() {
        let config = Config {
            browser_compare: true,
            ..Config::default()
        };
        let vcs = FakeVcs::default()
            .with_tag("deploy-a", "c1", 1)
            .with_sha("main", &"9".repeat(40))
            .with_remote_url("origin", "git@github.com:acme/shop.git");
        let (host, prompter) = (FakeHost::default(), FakePrompter::default());
        let mut session = Session::new(&config, &vcs, &host, &prompter);

        show_commit_log(&mut session).unwrap();
        assert_eq!(
            host.opened(),
            vec!["https://github.com/acme/shop/compare/deploy-a...99999999"]
        );
        assert_eq!(vcs.count_calls("show-log"), 0);
    }

    #[test]
    fn test_show_commit_log_browser_with_unnamed_remote() {
        let url = "git@github.com:acme/shop.git";
        let config = Config {
            repository: Some(url.to_string()),
            browser_compare: true,
            ..Config::default()
        };
        let vcs = FakeVcs::default()
            .with_tag("deploy-a", "c1", 1)
            .with_sha("main", &"9".repeat(40));
        let (host, prompter) = (FakeHost::default(), FakePrompter::default());
        let mut session = Session::new(&config, &vcs, &host, &prompter);

        show_commit_log(&mut session).unwrap();
        assert_eq!(vcs.count_calls(&format!("fetch {}", url)), 1);
        assert_eq!(host.opened().len(), 1);
    }

    #[test]
    fn test_plan_commit_log_shows_nothing() {
        let config = Config {
            browser_compare: true,
            ..Config::default()
        };
        let vcs = FakeVcs::default()
            .with_tag("deploy-a", "c1", 1)
            .with_sha("main", &"9".repeat(40))
            .with_remote_url("origin", "git@github.com:acme/shop.git");
        let (host, prompter) = (FakeHost::default(), FakePrompter::default());
        let mut session = Session::new(&config, &vcs, &host, &prompter);

        let (range_out, plan) = plan_commit_log(&mut session).unwrap();
        assert_eq!(range_out, range("deploy-a", "99999999"));
        assert!(matches!(plan, LogDisplay::Browser { .. }));
        assert!(host.opened().is_empty());
        assert_eq!(vcs.count_calls("show-log"), 0);

        display_commit_log(&session, &plan).unwrap();
        assert_eq!(host.opened().len(), 1);
    }

    #[test]
    fn test_show_commit_log_runs_git_log() {
        let config = Config::default();
        let vcs = FakeVcs::default()
            .with_tag("deploy-a", "c1", 1)
            .with_sha("main", &"9".repeat(40));
        let (host, prompter) = (FakeHost::default(), FakePrompter::default());
        let mut session = Session::new(&config, &vcs, &host, &prompter);

        let (_, display) = show_commit_log(&mut session).unwrap();
        assert!(matches!(display, LogDisplay::Plain { .. }));
        assert_eq!(vcs.count_calls("show-log log deploy-a..99999999"), 1);
        // browser disabled, so the remote url is never read
        assert_eq!(vcs.count_calls("config remote."), 0);
    }
}
