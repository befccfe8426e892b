//! Shell completions generation command

use std::io;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::cli::Cli;

/// Generate shell completions
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(shell = ?self.shell, "executing completions command");
        let mut cmd = Cli::command();
        let shell = self.shell;

        match &self.output {
            Some(path) => {
                let mut file = std::fs::File::create(path)?;
                generate(shell, &mut cmd, "deploytag", &mut file);
                if !cli.quiet {
                    println!("Completions written to {}", path.display());
                }
            }
            None => generate(shell, &mut cmd, "deploytag", &mut io::stdout()),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_completions_mention_subcommands() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deploytag.bash");
        let cli = Cli::try_parse_from([
            "deploytag",
            "-q",
            "completions",
            "bash",
            "--output",
            path.to_str().unwrap(),
        ])
        .unwrap();
        match &cli.command {
            crate::cli::Commands::Completions(cmd) => cmd.execute(&cli).unwrap(),
            other => panic!("unexpected command: {other:?}"),
        }

        let script = std::fs::read_to_string(&path).unwrap();
        assert!(script.contains("guard-committed"));
        assert!(script.contains("show-tags"));
    }

    #[test]
    fn test_completions_accept_every_shell_name() {
        for (name, shell) in [
            ("bash", Shell::Bash),
            ("zsh", Shell::Zsh),
            ("fish", Shell::Fish),
            ("powershell", Shell::PowerShell),
            ("elvish", Shell::Elvish),
        ] {
            let cli = Cli::try_parse_from(["deploytag", "completions", name]).unwrap();
            match cli.command {
                crate::cli::Commands::Completions(cmd) => assert_eq!(cmd.shell, shell),
                other => panic!("unexpected command: {other:?}"),
            }
        }
        assert!(Cli::try_parse_from(["deploytag", "completions", "tcsh"]).is_err());
    }
}
