//! Commit-log command

use clap::Args;
use tracing::info;

use deploytag_core::workflow::{display_commit_log, plan_commit_log, LogDisplay};
use deploytag_core::CommitRange;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Show commits between the last release and what is about to ship
#[derive(Debug, Args)]
pub struct CommitLogCommand {
    /// Open the GitHub compare page instead of running git log
    #[arg(long)]
    pub browser: bool,
}

impl CommitLogCommand {
    /// Execute the commit-log command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(browser = self.browser, "executing commit-log command");
        let mut workspace = cli.workspace()?;
        workspace.config.browser_compare |= self.browser;

        let mut session = workspace.session();
        let (range, plan) = plan_commit_log(&mut session)?;

        let chatty = cli.format == OutputFormat::Text && !cli.quiet;
        if chatty {
            output::info(&range_message(&range));
        }

        display_commit_log(&session, &plan)?;

        match cli.format {
            OutputFormat::Json => {
                let report = serde_json::json!({
                    "from": range.from,
                    "to": range.to,
                    "display": plan,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                if let (true, LogDisplay::Browser { url }) = (chatty, &plan) {
                    output::info(&format!("opened {}", url));
                }
            }
        }
        Ok(())
    }
}

fn range_message(range: &CommitRange) -> String {
    format!("Displaying commits from {} to {}", range.from, range.to)
}
