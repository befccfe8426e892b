//! Config command

use clap::Args;
use console::style;
use tracing::info;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Print the effective configuration
#[derive(Debug, Args)]
pub struct ConfigCommand {}

impl ConfigCommand {
    /// Execute the config command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing config command");
        let (config, path) = cli.effective_config()?;

        match cli.format {
            OutputFormat::Json => {
                let report = serde_json::json!({
                    "config_path": path.as_ref().map(|p| p.to_string_lossy().to_string()),
                    "tag_prefix": config.tag_prefix(),
                    "config": config,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                match &path {
                    Some(p) => println!("{}", output::key_value("Config file", &p.display().to_string())),
                    None => println!(
                        "  {}: {} (using defaults)",
                        style("Config file").dim(),
                        style("not found").yellow()
                    ),
                }
                println!("{}", output::key_value("Tag prefix", config.tag_prefix()));
                println!();
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        Ok(())
    }
}
