//! Yes/no confirmation prompts.
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

pub trait Confirm {
    /// Ask `question`; an empty answer selects `default`.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;
}

/// Answers every prompt with its default. Used for non-interactive runs.
#[derive(Debug, Default)]
pub struct DefaultAnswer;

impl Confirm for DefaultAnswer {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        tracing::debug!(question, default, "prompt answered with default");
        Ok(default)
    }
}

/// Blocking prompt on a line-oriented reader (stdin in production).
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            write!(self.output, "{question} {hint}: ").context("write prompt")?;
            self.output.flush().context("flush prompt")?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line).context("read answer")?;
            if read == 0 {
                // EOF: nobody is there to answer.
                writeln!(self.output).context("write prompt")?;
                return Ok(default);
            }
            match parse_answer(&line) {
                Some(answer) => return Ok(answer.unwrap_or(default)),
                None => writeln!(self.output, "Please answer yes or no.")
                    .context("write prompt")?,
            }
        }
    }
}

/// `Some(None)` is an empty answer, `None` is unrecognized input.
fn parse_answer(line: &str) -> Option<Option<bool>> {
    let trimmed = line.trim().to_lowercase();
    match trimmed.as_str() {
        "" => Some(None),
        "y" | "yes" => Some(Some(true)),
        "n" | "no" => Some(Some(false)),
        _ => None,
    }
}
