//! Remote operations

use std::time::Instant;

use tracing::{info, instrument};

use deploytag_core::Remote;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Every line of `git remote -v` as a name and URL
    pub fn list_remotes(&self) -> Result<Vec<Remote>> {
        let out = self.git(&["remote", "-v"])?.check()?;
        Ok(parse_remotes(&out.stdout))
    }

    /// Configured URL of a remote alias
    pub fn configured_url(&self, name: &str) -> Result<Option<String>> {
        let key = format!("remote.{}.url", name);
        let out = self.git(&["config", &key])?;
        let url = out.stdout.trim();
        Ok((out.success() && !url.is_empty()).then(|| url.to_string()))
    }

    /// `git fetch <remote>`
    #[instrument(skip(self))]
    pub fn fetch_remote(&self, remote: &str) -> Result<()> {
        let start = Instant::now();
        self.git_checked(&["fetch", remote])?;
        info!(
            remote,
            duration_ms = start.elapsed().as_millis(),
            "fetched remote"
        );
        Ok(())
    }

    /// `git push <remote> <tag>`
    #[instrument(skip(self))]
    pub fn push_tag_to(&self, remote: &str, tag: &str) -> Result<()> {
        let start = Instant::now();
        self.git_checked(&["push", remote, tag])?;
        info!(
            remote,
            tag,
            duration_ms = start.elapsed().as_millis(),
            "pushed tag"
        );
        Ok(())
    }
}

/// Parse `git remote -v` output.
///
/// Each line is `<name>\t<url> (fetch|push)`; lines without both fields are
/// ignored. Adjacent duplicates from the fetch/push pair are collapsed.
pub fn parse_remotes(output: &str) -> Vec<Remote> {
    let mut remotes: Vec<Remote> = output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split(['\t', ' ']).filter(|f| !f.is_empty());
            let name = fields.next()?;
            let url = fields.next()?;
            Some(Remote::new(name, url))
        })
        .collect();
    remotes.dedup();
    remotes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    #[test]
    fn test_parse_remotes() {
        let output = "origin\tgit@example.com:org/repo.git (fetch)\n\
                      origin\tgit@example.com:org/repo.git (push)\n\
                      fork\thttps://example.com/me/repo.git (fetch)\n\
                      fork\thttps://example.com/me/repo.git (push)\n\
                      \n\
                      broken\n";
        assert_eq!(
            parse_remotes(output),
            vec![
                Remote::new("origin", "git@example.com:org/repo.git"),
                Remote::new("fork", "https://example.com/me/repo.git"),
            ]
        );
    }

    #[test]
    fn test_list_remotes_and_url() {
        let fixture = Fixture::new();
        let repo = fixture.repo();
        let upstream = fixture.upstream_url();

        let remotes = repo.list_remotes().unwrap();
        assert_eq!(remotes, vec![Remote::new("origin", upstream.as_str())]);
        assert_eq!(repo.configured_url("origin").unwrap(), Some(upstream));
        assert_eq!(repo.configured_url("nope").unwrap(), None);
    }

    #[test]
    fn test_push_tag_reaches_upstream() {
        let fixture = Fixture::new();
        let repo = fixture.repo();

        repo.create_tag("deploy-one", "first", "main").unwrap();
        repo.push_tag_to("origin", "deploy-one").unwrap();

        let out = fixture.git_upstream(&["tag", "--list"]);
        assert!(out.lines().any(|l| l == "deploy-one"));
    }

    #[test]
    fn test_push_to_unknown_remote_fails() {
        let fixture = Fixture::new();
        let repo = fixture.repo();
        repo.create_tag("deploy-one", "first", "main").unwrap();

        let err = repo.push_tag_to("nowhere", "deploy-one").unwrap_err();
        assert!(err.to_string().starts_with("failed: git push nowhere deploy-one"));
    }
}
