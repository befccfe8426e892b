//! Operating system facilities behind the [`Host`] trait

use chrono::{DateTime, Local};
use tracing::debug;

use deploytag_core::{Host, Result};

use crate::runner::ShellRunner;

/// Real clock, `whoami`, and the platform URL opener
#[derive(Debug, Clone)]
pub struct SystemHost {
    runner: ShellRunner,
}

impl SystemHost {
    pub fn new(runner: ShellRunner) -> Self {
        Self { runner }
    }

    /// Whether opening a URL is echoed
    pub fn echoes(&self) -> bool {
        self.runner.echoes()
    }
}

/// Program and leading arguments that open a URL on this platform
fn opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

impl Host for SystemHost {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn username(&self) -> Result<String> {
        let out = self.runner.run::<&str>("whoami", &[])?.check()?;
        let name = out.stdout.trim().to_string();
        debug!(user = %name, "resolved OS user");
        Ok(name)
    }

    fn open_url(&self, url: &str) -> Result<()> {
        let (program, lead) = opener();
        let mut args: Vec<&str> = lead.to_vec();
        args.push(url);
        self.runner.run_checked(program, &args)?;
        Ok(())
    }
}
