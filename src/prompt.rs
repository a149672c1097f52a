//! Operator fallback for literals the reference could not resolve.
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Synchronous request/response with an operator.
pub trait ValuePrompt {
    /// Ask for the default value of `key`. `None` means input is exhausted.
    fn ask(&mut self, key: &str) -> Result<Option<String>>;
}

/// Line-buffered prompt over a reader/writer pair (stdin/stdout in the CLI).
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ValuePrompt for LinePrompt<R, W> {
    fn ask(&mut self, key: &str) -> Result<Option<String>> {
        write!(self.output, "  > Enter the value for '{key}': ").context("write prompt")?;
        self.output.flush().context("flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("read operator response")?;
        if read == 0 {
            return Ok(None);
        }
        let value = line
            .strip_suffix('\n')
            .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
            .unwrap_or(&line);
        Ok(Some(value.to_string()))
    }
}

/// Prompt used when interactive mode is off; never yields a value.
pub struct Disabled;

impl ValuePrompt for Disabled {
    fn ask(&mut self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }
}
