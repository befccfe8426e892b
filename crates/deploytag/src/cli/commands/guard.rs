//! Guard commands

use tracing::info;

use deploytag_core::workflow::{guard_committed, guard_upstream};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Which guards a guard command runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardSelection {
    Committed,
    Upstream,
    All,
}

impl GuardSelection {
    fn committed(self) -> bool {
        matches!(self, Self::Committed | Self::All)
    }

    fn upstream(self) -> bool {
        matches!(self, Self::Upstream | Self::All)
    }
}

/// Run one or both pre-deploy guards
#[derive(Debug)]
pub struct GuardCommand {
    selection: GuardSelection,
}

impl GuardCommand {
    pub fn new(selection: GuardSelection) -> Self {
        Self { selection }
    }

    /// Execute the guard command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(selection = ?self.selection, "executing guard command");
        let workspace = cli.workspace()?;
        let mut session = workspace.session();

        let mut report = serde_json::Map::new();
        if self.selection.committed() {
            let outcome = guard_committed(&mut session)?;
            report.insert("guard_committed".into(), outcome.as_str().into());
            if cli.format == OutputFormat::Text && !cli.quiet {
                output::guard_outcome("guard_committed", outcome);
            }
        }
        if self.selection.upstream() {
            let outcome = guard_upstream(&mut session)?;
            report.insert("guard_upstream".into(), outcome.as_str().into());
            if cli.format == OutputFormat::Text && !cli.quiet {
                output::guard_outcome("guard_upstream", outcome);
            }
        }

        if cli.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection() {
        assert!(GuardSelection::All.committed() && GuardSelection::All.upstream());
        assert!(GuardSelection::Committed.committed());
        assert!(!GuardSelection::Committed.upstream());
        assert!(GuardSelection::Upstream.upstream());
        assert!(!GuardSelection::Upstream.committed());
    }
}
