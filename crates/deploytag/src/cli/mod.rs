//! CLI definition and command handling

pub mod commands;
pub mod output;
mod prompt;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use deploytag_core::config::{
    load_config, load_config_or_default, validate_config, Config, GIT_LOG_COMMAND_ENV,
};
use deploytag_core::{ConfigError, Session};
use deploytag_git::{GitRepo, ShellRunner, SystemHost};

use commands::{
    CommitLogCommand, CompletionsCommand, ConfigCommand, GuardCommand, GuardSelection,
    InitCommand, RetagCommand, ShowTagsCommand, TagCommand,
};
pub use prompt::TerminalPrompter;

/// deploytag - git-aware pre-deploy guards and tag-based releases
#[derive(Debug, Parser)]
#[command(name = "deploytag")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file (default: search for deploytag.toml / deploytag.yaml)
    #[arg(long, global = true, env = "DEPLOYTAG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Deployment stage, e.g. staging or production
    #[arg(long, global = true)]
    pub stage: Option<String>,

    /// Override a configuration value, e.g. -s skip_guard_upstream=true
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", global = true, value_parser = parse_override)]
    pub set: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Abort unless the working copy is on the right branch and fully committed
    GuardCommitted,

    /// Abort unless the working branch matches its upstream copy
    GuardUpstream,

    /// Run both guards
    Guard,

    /// Tag the working branch and push the tag
    Tag(TagCommand),

    /// Promote an existing tag under a new name and push it
    Retag(RetagCommand),

    /// List the most recent release tags
    ShowTags(ShowTagsCommand),

    /// Show commits between the last release and what is about to ship
    CommitLog(CommitLogCommand),

    /// Print the effective configuration
    Config(ConfigCommand),

    /// Write a starter configuration file
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::GuardCommitted => GuardCommand::new(GuardSelection::Committed).execute(&self),
            Commands::GuardUpstream => GuardCommand::new(GuardSelection::Upstream).execute(&self),
            Commands::Guard => GuardCommand::new(GuardSelection::All).execute(&self),
            Commands::Tag(ref cmd) => cmd.execute(&self),
            Commands::Retag(ref cmd) => cmd.execute(&self),
            Commands::ShowTags(ref cmd) => cmd.execute(&self),
            Commands::CommitLog(ref cmd) => cmd.execute(&self),
            Commands::Config(ref cmd) => cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }

    /// Configuration file plus `--stage`, `-s` and environment overrides
    pub fn effective_config(&self) -> anyhow::Result<(Config, Option<PathBuf>)> {
        let cwd = self.base_dir()?;
        let (mut config, path) = match &self.config {
            Some(path) => (load_config(path)?, Some(path.clone())),
            None => load_config_or_default(&cwd)?,
        };

        if let Some(stage) = &self.stage {
            config.stage = Some(stage.clone());
        }
        config.apply_overrides(&self.set)?;
        config.git_log_command = std::env::var(GIT_LOG_COMMAND_ENV).ok();
        validate_config(&config)?;

        debug!(config = ?config, "effective configuration");
        Ok((config, path))
    }

    /// `-C` when given, otherwise the current directory
    fn base_dir(&self) -> std::io::Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }

    /// Everything a workflow command needs, rooted at the working directory.
    ///
    /// Mutating commands are always echoed; `--quiet` only silences status
    /// and result output.
    pub fn workspace(&self) -> anyhow::Result<Workspace> {
        let (config, _) = self.effective_config()?;
        let repo = GitRepo::discover(&self.base_dir()?)?;
        let host = SystemHost::new(ShellRunner::new(repo.path()));

        Ok(Workspace {
            config,
            repo,
            host,
            prompter: TerminalPrompter,
        })
    }
}

/// Owned collaborators a [`Session`] borrows for one run
pub struct Workspace {
    pub config: Config,
    pub repo: GitRepo,
    pub host: SystemHost,
    pub prompter: TerminalPrompter,
}

impl Workspace {
    /// Start a fresh session over this workspace
    pub fn session(&self) -> Session<'_> {
        Session::new(&self.config, &self.repo, &self.host, &self.prompter)
    }
}

/// Parse a `key=value` override
fn parse_override(raw: &str) -> Result<(String, String), ConfigError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(ConfigError::ParseError(format!(
            "expected KEY=VALUE, got '{}'",
            raw
        ))),
    }
}
