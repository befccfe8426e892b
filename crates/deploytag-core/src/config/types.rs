//! Configuration types

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::defaults::{
    DEFAULT_FROM_PREFIX, DEFAULT_SHOW_TAGS_COUNT, DEFAULT_TAG_PREFIX, DEFAULT_TAG_TEMPLATE,
    PRODUCTION_STAGE,
};

/// Main configuration for deploytag
///
/// Every option is optional; the defaults reproduce a plain
/// `deploy-<datetime>` tag cut from the current checkout and pushed to
/// `origin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL of the canonical upstream repository
    pub repository: Option<String>,

    /// Branch to tag and deploy; defaults to the current checkout
    pub branch: Option<String>,

    /// Deployment stage (e.g. staging, production)
    pub stage: Option<String>,

    /// Exact tag name to create, bypassing the template
    pub tag: Option<String>,

    /// Prefix for new tags; defaults to the stage, then `deploy`
    pub tag_prefix: Option<String>,

    /// Suffix template with `%{date}`, `%{datetime}`, `%{who}`, `%{what}`
    pub tag_template: String,

    /// Exact commit-ish to retag
    pub from_tag: Option<String>,

    /// Prefix of tags that are promoted by `retag`
    pub from_prefix: String,

    /// Skip the clean working copy guard
    pub skip_guard_committed: bool,

    /// Skip the upstream sync guard
    pub skip_guard_upstream: bool,

    /// Ask before retagging
    pub confirm_tag: bool,

    /// Open a browser compare view for GitHub remotes in `commit-log`
    pub browser_compare: bool,

    /// Number of tags listed by `show-tags`
    pub show_tags_count: usize,

    /// Custom git log sub-command, taken from the environment only
    #[serde(skip)]
    pub git_log_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: None,
            branch: None,
            stage: None,
            tag: None,
            tag_prefix: None,
            tag_template: DEFAULT_TAG_TEMPLATE.to_string(),
            from_tag: None,
            from_prefix: DEFAULT_FROM_PREFIX.to_string(),
            skip_guard_committed: false,
            skip_guard_upstream: false,
            confirm_tag: false,
            browser_compare: false,
            show_tags_count: DEFAULT_SHOW_TAGS_COUNT,
            git_log_command: None,
        }
    }
}

impl Config {
    /// Prefix for newly created tags: `tag_prefix`, then `stage`, then `deploy`
    pub fn tag_prefix(&self) -> &str {
        self.tag_prefix
            .as_deref()
            .or(self.stage.as_deref())
            .unwrap_or(DEFAULT_TAG_PREFIX)
    }

    /// Whether the production commit-log policy applies
    pub fn is_production(&self) -> bool {
        self.stage.as_deref() == Some(PRODUCTION_STAGE)
    }

    /// Apply a single `key=value` override
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "repository" => self.repository = Some(value.to_string()),
            "branch" => self.branch = Some(value.to_string()),
            "stage" => self.stage = Some(value.to_string()),
            "tag" => self.tag = Some(value.to_string()),
            "tag_prefix" => self.tag_prefix = Some(value.to_string()),
            "tag_template" => self.tag_template = value.to_string(),
            "from_tag" => self.from_tag = Some(value.to_string()),
            "from_prefix" => self.from_prefix = value.to_string(),
            "skip_guard_committed" => self.skip_guard_committed = parse_bool(key, value)?,
            "skip_guard_upstream" => self.skip_guard_upstream = parse_bool(key, value)?,
            "confirm_tag" => self.confirm_tag = parse_bool(key, value)?,
            "browser_compare" => self.browser_compare = parse_bool(key, value)?,
            "show_tags_count" => {
                self.show_tags_count = value.parse().map_err(|_| ConfigError::InvalidValue {
                    field: key.to_string(),
                    message: format!("expected a positive integer, got '{}'", value),
                })?
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Apply `key=value` overrides in order; later ones win
    pub fn apply_overrides<'a, I>(&mut self, overrides: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = &'a (String, String)>,
    {
        for (key, value) in overrides {
            self.set(key, value)?;
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: key.to_string(),
            message: format!("expected true or false, got '{}'", value),
        }),
    }
}
