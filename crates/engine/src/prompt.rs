//! Operator interaction seams

use std::io::{self, BufRead, Write};

use rekey_credential::Secret;

/// Interactive prompts presented to the operator.
pub trait Prompter {
    /// Prompt with echo disabled and return the entered secret.
    fn hidden(&mut self, prompt: &str) -> io::Result<Secret>;

    /// Prompt for a visible line of input, returned without the trailing
    /// newline. End of input is an error.
    fn line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Terminal-backed prompter used by the real binary.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn hidden(&mut self, prompt: &str) -> io::Result<Secret> {
        rpassword::prompt_password(prompt).map(Secret::new)
    }

    fn line(&mut self, prompt: &str) -> io::Result<String> {
        let mut out = io::stdout();
        out.write_all(prompt.as_bytes())?;
        out.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        while line.ends_with(['\n', '\r']) {
            line.pop();
        }
        Ok(line)
    }
}
