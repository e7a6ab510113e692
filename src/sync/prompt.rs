//! Operator prompts.
//!
//! Confirmation and menu selection are an injected capability so the runner
//! can be driven by a scripted responder in tests instead of a terminal.

use miette::Diagnostic;
use std::cell::RefCell;
use std::io::{self, BufRead, Stdout, Write};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Errors that can occur while talking to the operator.
#[derive(Error, Diagnostic, Debug)]
pub enum PromptError {
    #[error("Prompt IO error: {0}")]
    #[diagnostic(code(seedsync::sync::prompt::io))]
    Io(#[from] io::Error),

    #[error("Input closed before an answer was given")]
    #[diagnostic(code(seedsync::sync::prompt::closed))]
    Closed,

    #[error("Choice {index} is out of range")]
    #[diagnostic(code(seedsync::sync::prompt::invalid_choice))]
    InvalidChoice { index: usize },

    #[error("No options to choose from")]
    #[diagnostic(code(seedsync::sync::prompt::no_options))]
    NoOptions,
}

/// Trait for operator interaction. Can be mocked in tests.
#[cfg_attr(test, automock)]
pub trait Prompt {
    /// Ask a yes/no question. Anything but an answer starting with `y` is "no".
    fn confirm(&self, message: &str) -> Result<bool, PromptError>;

    /// Ask the operator to pick one of `options`; returns its index.
    fn choose(&self, question: &str, options: &[String]) -> Result<usize, PromptError>;
}

/// Prompt on a line-oriented reader and writer (stdin/stdout in production).
pub struct ConsolePrompt<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl ConsolePrompt<io::StdinLock<'static>, Stdout> {
    /// Prompt on the process terminal.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    /// Consume the prompt and return the writer (for inspecting output in tests).
    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    fn read_answer(&self) -> Result<String, PromptError> {
        let mut line = String::new();
        let read = self.input.borrow_mut().read_line(&mut line)?;
        if read == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompt for ConsolePrompt<R, W> {
    fn confirm(&self, message: &str) -> Result<bool, PromptError> {
        {
            let mut out = self.output.borrow_mut();
            write!(out, " {} (yes/no) [no]:\n > ", message)?;
            out.flush()?;
        }

        let answer = self.read_answer()?;
        Ok(answer.to_ascii_lowercase().starts_with('y'))
    }

    fn choose(&self, question: &str, options: &[String]) -> Result<usize, PromptError> {
        if options.is_empty() {
            return Err(PromptError::NoOptions);
        }

        loop {
            {
                let mut out = self.output.borrow_mut();
                writeln!(out, " {}:", question)?;
                for (index, option) in options.iter().enumerate() {
                    writeln!(out, "  [{}] {}", index, option)?;
                }
                write!(out, " > ")?;
                out.flush()?;
            }

            let answer = self.read_answer()?;
            if let Some(index) = match_choice(&answer, options) {
                return Ok(index);
            }

            let mut out = self.output.borrow_mut();
            writeln!(out, " Value \"{}\" is invalid", answer)?;
        }
    }
}

/// Resolve an answer given either as an index or as an option name.
fn match_choice(answer: &str, options: &[String]) -> Option<usize> {
    if let Ok(index) = answer.parse::<usize>() {
        return (index < options.len()).then_some(index);
    }
    options
        .iter()
        .position(|option| option.eq_ignore_ascii_case(answer))
}
