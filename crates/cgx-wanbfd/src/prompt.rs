//! Terminal-backed `Prompter`.
//!
//! Uses dialoguer on an interactive terminal and plain line reads when stdin
//! is piped, so answers can be scripted.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::Input;
use secrecy::SecretString;

use cgx_core::{CoreError, Prompter};

fn prompt_err(e: impl std::fmt::Display) -> CoreError {
    CoreError::Prompt {
        message: e.to_string(),
    }
}

pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String, CoreError> {
        if self.interactive {
            return Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err);
        }

        println!("{prompt}:");
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line).map_err(prompt_err)?;
        if read == 0 {
            return Err(prompt_err("input closed"));
        }
        Ok(line)
    }

    fn read_secret(&mut self, prompt: &str) -> Result<SecretString, CoreError> {
        rpassword::prompt_password(prompt)
            .map(SecretString::from)
            .map_err(prompt_err)
    }
}
