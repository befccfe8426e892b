//! Tag and retag commands

use clap::Args;
use tracing::info;

use deploytag_core::workflow::ReleaseWorkflow;
use deploytag_core::ReleaseResult;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Tag the working branch and push the tag
#[derive(Debug, Args)]
pub struct TagCommand {
    /// Exact tag name, bypassing prefix and template
    #[arg(long)]
    pub name: Option<String>,
}

/// Promote an existing tag under a new name and push it
#[derive(Debug, Args)]
pub struct RetagCommand {
    /// Tag to promote (default: newest tag matching from_prefix)
    #[arg(long)]
    pub from: Option<String>,

    /// Exact name for the new tag, bypassing prefix and template
    #[arg(long)]
    pub name: Option<String>,

    /// Ask before promoting
    #[arg(long)]
    pub confirm: bool,
}

impl TagCommand {
    /// Execute the tag command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(name = ?self.name, "executing tag command");
        let mut workspace = cli.workspace()?;
        if let Some(name) = &self.name {
            workspace.config.tag = Some(name.clone());
        }

        let mut session = workspace.session();
        let mut workflow = ReleaseWorkflow::new(&mut session);
        let report = workflow.guard()?;
        if cli.format == OutputFormat::Text && !cli.quiet {
            output::guard_outcome("guard_committed", report.committed);
            output::guard_outcome("guard_upstream", report.upstream);
        }

        let result = workflow.tag()?;
        print_result(cli, &result)
    }
}

impl RetagCommand {
    /// Execute the retag command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(from = ?self.from, name = ?self.name, "executing retag command");
        let mut workspace = cli.workspace()?;
        if let Some(from) = &self.from {
            workspace.config.from_tag = Some(from.clone());
        }
        if let Some(name) = &self.name {
            workspace.config.tag = Some(name.clone());
        }
        workspace.config.confirm_tag |= self.confirm;

        let mut session = workspace.session();
        let result = ReleaseWorkflow::new(&mut session).retag()?;
        print_result(cli, &result)
    }
}

fn print_result(cli: &Cli, result: &ReleaseResult) -> anyhow::Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Text => {
            if cli.quiet {
                return Ok(());
            }
            let tag = output::tag_style().apply_to(&result.tag);
            output::success(&format!(
                "{} {} from {} and pushed to {}",
                result.action, tag, result.source, result.remote
            ));
            println!("{}", output::key_value("deploy ref", &result.deploy_ref));
        }
    }
    Ok(())
}
