//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use crate::domain::PreReleaseChoice;
use crate::error::{RtagError, Result};

pub mod formatter;

pub use formatter::{display_boundary_warning, display_tag_instructions, Style};

const INVALID_INPUT: &str = "invalid input, please try again (Ctrl+C to exit)";

/// Line-oriented prompt loop over any reader/writer pair.
///
/// Invalid answers are re-asked; running out of input cancels the operation.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// # Arguments
    /// * `assume_yes` - Answer every yes/no question with "yes" without reading input
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Prompter {
            input,
            output,
            assume_yes,
        }
    }

    /// Consume the prompter and return its output sink
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(RtagError::Cancelled);
        }
        Ok(line.trim().to_string())
    }

    /// Ask until `parse` accepts the answer
    pub fn ask<T>(&mut self, prompt: &str, mut parse: impl FnMut(&str) -> Option<T>) -> Result<T> {
        loop {
            let answer = self.read_answer(prompt)?;
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }
            writeln!(self.output, "{}", INVALID_INPUT)?;
            writeln!(self.output)?;
        }
    }

    /// Ask a yes/no question; accepts y/yes/n/no in any case
    pub fn ask_yes_no(&mut self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            writeln!(self.output, "{}y", prompt)?;
            return Ok(true);
        }
        self.ask(prompt, |answer| match answer.to_lowercase().as_str() {
            "y" | "yes" => Some(true),
            "n" | "no" => Some(false),
            _ => None,
        })
    }

    /// Ask a yes/no question and cancel on "no"
    pub fn confirm(&mut self, prompt: &str) -> Result<()> {
        if self.ask_yes_no(prompt)? {
            Ok(())
        } else {
            Err(RtagError::Cancelled)
        }
    }

    /// Ask for a number in `1..=count`
    pub fn choose_number(&mut self, prompt: &str, count: usize) -> Result<usize> {
        self.ask(prompt, |answer| {
            answer
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=count).contains(n))
        })
    }

    /// Ask for one of alpha/beta/rc/release
    pub fn choose_pre_release(&mut self, prompt: &str) -> Result<PreReleaseChoice> {
        self.ask(prompt, |answer| answer.parse().ok())
    }
}

impl<R, W: Write> Write for Prompter<R, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}
