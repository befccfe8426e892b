//! Terminal prompts

use dialoguer::{Confirm, Input};

use deploytag_core::{DeployError, Prompter, Result};

/// [`Prompter`] reading answers from the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

fn prompt_error(err: dialoguer::Error) -> DeployError {
    DeployError::Io(std::io::Error::other(err))
}

impl Prompter for TerminalPrompter {
    fn ask(&self, question: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }

    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }
}
