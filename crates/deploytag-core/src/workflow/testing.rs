//! In-memory fakes for the workflow seams

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Local, TimeZone};

use crate::error::{GitError, Result};
use crate::types::{Remote, TagSummary};
use crate::vcs::{Host, Prompter, VersionControl};

#[derive(Debug, Clone)]
pub(crate) struct FakeTag {
    pub name: String,
    pub target: String,
    pub tagger_ts: i64,
    pub message: String,
}

/// Records every call as a short git-like string
pub(crate) struct FakeVcs {
    remotes: Vec<Remote>,
    branch: String,
    shas: HashMap<String, String>,
    tags: RefCell<Vec<FakeTag>>,
    clean: bool,
    remote_urls: HashMap<String, String>,
    fail_push: bool,
    clock: Cell<i64>,
    calls: RefCell<Vec<String>>,
}

impl Default for FakeVcs {
    fn default() -> Self {
        Self {
            remotes: Vec::new(),
            branch: "main".to_string(),
            shas: HashMap::new(),
            tags: RefCell::new(Vec::new()),
            clean: true,
            remote_urls: HashMap::new(),
            fail_push: false,
            clock: Cell::new(1_000),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakeVcs {
    pub fn with_remotes(mut self, remotes: Vec<Remote>) -> Self {
        self.remotes = remotes;
        self
    }

    pub fn on_branch(mut self, branch: &str) -> Self {
        self.branch = branch.to_string();
        self
    }

    pub fn with_sha(mut self, reference: &str, sha: &str) -> Self {
        self.shas.insert(reference.to_string(), sha.to_string());
        self
    }

    pub fn with_tag(self, name: &str, target: &str, tagger_ts: i64) -> Self {
        self.tags.borrow_mut().push(FakeTag {
            name: name.to_string(),
            target: target.to_string(),
            tagger_ts,
            message: format!("tag {}", name),
        });
        self
    }

    pub fn dirty(mut self) -> Self {
        self.clean = false;
        self
    }

    pub fn with_remote_url(mut self, remote: &str, url: &str) -> Self {
        self.remote_urls.insert(remote.to_string(), url.to_string());
        self
    }

    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count_calls(&self, needle: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.contains(needle)).count()
    }

    pub fn tag(&self, name: &str) -> Option<FakeTag> {
        self.tags.borrow().iter().find(|t| t.name == name).cloned()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn resolve(&self, reference: &str) -> Option<String> {
        if let Some(sha) = self.shas.get(reference) {
            return Some(sha.clone());
        }
        self.tags
            .borrow()
            .iter()
            .find(|t| t.name == reference)
            .map(|t| t.target.clone())
    }

    fn matching(&self, prefix: &str) -> Vec<FakeTag> {
        let wanted = format!("{}-", prefix);
        let mut tags: Vec<_> = self
            .tags
            .borrow()
            .iter()
            .filter(|t| t.name.starts_with(&wanted))
            .cloned()
            .collect();
        tags.sort_by(|a, b| b.tagger_ts.cmp(&a.tagger_ts));
        tags
    }
}

impl VersionControl for FakeVcs {
    fn fetch(&self, remote: &str) -> Result<()> {
        self.record(format!("fetch {}", remote));
        Ok(())
    }

    fn remotes(&self) -> Result<Vec<Remote>> {
        self.record("remote -v".to_string());
        Ok(self.remotes.clone())
    }

    fn current_branch(&self) -> Result<String> {
        self.record("symbolic-ref -q HEAD".to_string());
        Ok(self.branch.clone())
    }

    fn commit_sha(&self, reference: &str) -> Result<Option<String>> {
        self.record(format!("log {}", reference));
        Ok(self.resolve(reference))
    }

    fn last_tag(&self, pattern: &str) -> Result<Option<String>> {
        self.record(format!("for-each-ref {}", pattern));
        Ok(self.matching(pattern).into_iter().next().map(|t| t.name))
    }

    fn working_tree_clean(&self) -> Result<bool> {
        self.record("diff HEAD --exit-code".to_string());
        Ok(self.clean)
    }

    fn create_annotated_tag(&self, tag: &str, message: &str, target: &str) -> Result<()> {
        self.record(format!("tag -a -m {} {} {}", message, tag, target));
        let ts = self.clock.get() + 1;
        self.clock.set(ts);
        let resolved = self.resolve(target).unwrap_or_else(|| target.to_string());
        self.tags.borrow_mut().push(FakeTag {
            name: tag.to_string(),
            target: resolved,
            tagger_ts: ts,
            message: message.to_string(),
        });
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        let command = format!("push {} {}", remote, tag);
        self.record(command.clone());
        if self.fail_push {
            return Err(GitError::CommandFailed {
                command: format!("git {}", command),
                code: Some(1),
                stderr: "rejected".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        self.record(format!("config remote.{}.url", remote));
        Ok(self.remote_urls.get(remote).cloned())
    }

    fn recent_tags(&self, prefix: &str, count: usize) -> Result<Vec<TagSummary>> {
        self.record(format!("for-each-ref --count={} {}", count, prefix));
        Ok(self
            .matching(prefix)
            .into_iter()
            .take(count)
            .map(|t| TagSummary {
                name: t.name,
                tagger_email: "<ops@example.com>".to_string(),
                tagger_date: t.tagger_ts.to_string(),
                subject: t.message,
            })
            .collect())
    }

    fn show_log(&self, args: &[String]) -> Result<()> {
        self.record(format!("show-log {}", args.join(" ")));
        Ok(())
    }
}

pub(crate) struct FakeHost {
    now: DateTime<Local>,
    user: String,
    opened: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            now: Local
                .with_ymd_and_hms(year, month, day, hour, minute, 0)
                .unwrap(),
            user: "deployer".to_string(),
            opened: RefCell::new(Vec::new()),
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::at(2024, 3, 1, 14, 5)
    }
}

impl Host for FakeHost {
    fn now(&self) -> DateTime<Local> {
        self.now
    }

    fn username(&self) -> Result<String> {
        Ok(self.user.clone())
    }

    fn open_url(&self, url: &str) -> Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakePrompter {
    answers: RefCell<VecDeque<String>>,
    confirms: RefCell<VecDeque<bool>>,
    questions: RefCell<Vec<String>>,
}

impl FakePrompter {
    pub fn with_answer(self, answer: &str) -> Self {
        self.answers.borrow_mut().push_back(answer.to_string());
        self
    }

    pub fn with_confirm(self, answer: bool) -> Self {
        self.confirms.borrow_mut().push_back(answer);
        self
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.borrow().clone()
    }
}

impl Prompter for FakePrompter {
    fn ask(&self, question: &str) -> Result<String> {
        self.questions.borrow_mut().push(question.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| std::io::Error::other("no answer queued").into())
    }

    fn confirm(&self, question: &str, _default: bool) -> Result<bool> {
        self.questions.borrow_mut().push(question.to_string());
        self.confirms
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| std::io::Error::other("no confirmation queued").into())
    }
}
