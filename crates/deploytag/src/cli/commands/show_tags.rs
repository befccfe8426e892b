//! Show-tags command

use clap::Args;
use console::style;
use tracing::info;

use deploytag_core::TagSummary;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// List the most recent release tags, oldest first
#[derive(Debug, Args)]
pub struct ShowTagsCommand {
    /// Number of tags to show (default: show_tags_count)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

impl ShowTagsCommand {
    /// Execute the show-tags command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(count = ?self.count, "executing show-tags command");
        let mut workspace = cli.workspace()?;
        if let Some(count) = self.count {
            workspace.config.show_tags_count = count;
        }

        let session = workspace.session();
        let mut tags = session.show_tags()?;
        tags.reverse();

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&tags)?);
            }
            OutputFormat::Text => {
                let prefix = workspace.config.tag_prefix();
                if tags.is_empty() {
                    output::info(&format!("no tags matching {}-*", prefix));
                    return Ok(());
                }
                println!("{}", output::header(&format!("Recent {} tags", prefix)));
                for tag in &tags {
                    println!("{}", format_tag_line(tag));
                }
            }
        }
        Ok(())
    }
}

fn format_tag_line(tag: &TagSummary) -> String {
    let mut line = format!(
        "  {}  {}",
        output::tag_style().apply_to(&tag.name),
        style(&tag.tagger_date).dim()
    );
    if !tag.tagger_email.is_empty() {
        line.push_str(&format!("  {}", tag.tagger_email));
    }
    if !tag.subject.is_empty() {
        line.push_str(&format!("\n      {}", tag.subject));
    }
    line
}
