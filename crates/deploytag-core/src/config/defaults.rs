//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "deploytag.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "deploytag.yaml";

/// Prefix used when neither `tag_prefix` nor `stage` is set
pub const DEFAULT_TAG_PREFIX: &str = "deploy";

/// Default tag suffix template
pub const DEFAULT_TAG_TEMPLATE: &str = "%{datetime}";

/// Default prefix of tags promoted by `retag`
pub const DEFAULT_FROM_PREFIX: &str = "staging";

/// Remote used when no `repository` URL is configured
pub const DEFAULT_REMOTE: &str = "origin";

/// Stage name that switches `commit-log` to the promotion range
pub const PRODUCTION_STAGE: &str = "production";

/// Default number of tags listed by `show-tags`
pub const DEFAULT_SHOW_TAGS_COUNT: usize = 5;

/// Environment variable holding a custom git log sub-command
pub const GIT_LOG_COMMAND_ENV: &str = "git_log_command";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".deploytag.toml",
        ".deploytag.yaml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# deploytag configuration

# repository = "git@example.com:org/repo.git"
# branch = "main"
# stage = "staging"
# tag_prefix = "staging"
tag_template = "%{datetime}"
from_prefix = "staging"
skip_guard_committed = false
skip_guard_upstream = false
confirm_tag = false
browser_compare = false
show_tags_count = 5
"#;
