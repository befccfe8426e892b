//! Tag operations

use std::time::Instant;

use tracing::{debug, info, instrument};

use deploytag_core::TagSummary;

use crate::repository::{GitRepo, Result};

/// `for-each-ref` format for [`GitRepo::list_tags`], tab separated
const SUMMARY_FORMAT: &str =
    "--format=%(refname:short)%09%(taggeremail)%09%(taggerdate:iso)%09%(subject)";

fn tag_glob(prefix: &str) -> String {
    format!("refs/tags/{}-*", prefix)
}

impl GitRepo {
    /// Newest tag named `<prefix>-*` by tagger date
    pub fn newest_tag(&self, prefix: &str) -> Result<Option<String>> {
        let glob = tag_glob(prefix);
        let out = self.git(&[
            "for-each-ref",
            "--count=1",
            "--sort=-taggerdate",
            "--format=%(refname:short)",
            &glob,
        ])?;
        let name = out.stdout.trim();
        debug!(pattern = %glob, tag = name, "newest tag");
        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    /// Up to `count` tags named `<prefix>-*`, newest first
    pub fn list_tags(&self, prefix: &str, count: usize) -> Result<Vec<TagSummary>> {
        let count_arg = format!("--count={}", count);
        let glob = tag_glob(prefix);
        let out = self
            .git(&[
                "for-each-ref",
                &count_arg,
                "--sort=-taggerdate",
                SUMMARY_FORMAT,
                &glob,
            ])?
            .check()?;
        Ok(parse_tag_summaries(&out.stdout))
    }

    /// `git tag -a -m <message> <tag> <target>`
    #[instrument(skip(self, message))]
    pub fn create_tag(&self, tag: &str, message: &str, target: &str) -> Result<()> {
        let start = Instant::now();
        self.git_checked(&["tag", "-a", "-m", message, tag, target])?;
        info!(
            tag,
            target,
            duration_ms = start.elapsed().as_millis(),
            "created annotated tag"
        );
        Ok(())
    }
}

/// Parse the tab-separated lines produced with [`SUMMARY_FORMAT`]
pub fn parse_tag_summaries(output: &str) -> Vec<TagSummary> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut fields = line.splitn(4, '\t');
            let mut next = || fields.next().unwrap_or_default().to_string();
            TagSummary {
                name: next(),
                tagger_email: next(),
                tagger_date: next(),
                subject: next(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    #[test]
    fn test_parse_tag_summaries() {
        let output = "deploy-b\t<a@example.com>\t2024-03-02 09:30:00 +0000\tShip it\n\
                      deploy-a\t\t\t\n";
        let tags = parse_tag_summaries(output);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "deploy-b");
        assert_eq!(tags[0].tagger_email, "<a@example.com>");
        assert_eq!(tags[0].subject, "Ship it");
        assert_eq!(tags[1].name, "deploy-a");
        assert_eq!(tags[1].tagger_date, "");
    }

    #[test]
    fn test_newest_tag_orders_by_tagger_date() {
        let fixture = Fixture::new();
        // name order and date order disagree
        fixture.tag_at("deploy-2024-01-01-0000", "2020-01-01T00:00:00");
        fixture.tag_at("deploy-2023-12-31-2359", "2021-06-01T00:00:00");
        fixture.tag_at("staging-zzz", "2022-01-01T00:00:00");

        let repo = fixture.repo();
        assert_eq!(
            repo.newest_tag("deploy").unwrap().as_deref(),
            Some("deploy-2023-12-31-2359")
        );
        assert_eq!(repo.newest_tag("production").unwrap(), None);
    }

    #[test]
    fn test_created_tag_becomes_newest() {
        let fixture = Fixture::new();
        fixture.tag_at("deploy-old", "2020-01-01T00:00:00");
        let repo = fixture.repo();

        repo.create_tag("deploy-new", "deploytag tag: deploy-new", "main")
            .unwrap();
        assert_eq!(repo.newest_tag("deploy").unwrap().as_deref(), Some("deploy-new"));

        let tags = repo.list_tags("deploy", 5).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "deploy-new");
        assert_eq!(tags[0].subject, "deploytag tag: deploy-new");
        assert_eq!(tags[0].tagger_email, "<deployer@example.com>");
        assert_eq!(tags[1].name, "deploy-old");
    }

    #[test]
    fn test_list_tags_honours_count() {
        let fixture = Fixture::new();
        fixture.tag_at("deploy-1", "2020-01-01T00:00:00");
        fixture.tag_at("deploy-2", "2020-01-02T00:00:00");
        fixture.tag_at("deploy-3", "2020-01-03T00:00:00");

        let names: Vec<_> = fixture
            .repo()
            .list_tags("deploy", 2)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["deploy-3", "deploy-2"]);
    }

    #[test]
    fn test_create_existing_tag_fails() {
        let fixture = Fixture::new();
        let repo = fixture.repo();
        repo.create_tag("deploy-x", "one", "main").unwrap();
        let err = repo.create_tag("deploy-x", "two", "main").unwrap_err();
        assert!(err.to_string().starts_with("failed: git tag -a -m two deploy-x main"));
    }
}
