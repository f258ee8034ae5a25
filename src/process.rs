//! External command execution.
//!
//! Steps describe what to run as an [`Invocation`]; a [`CommandRunner`]
//! decides how. Every invocation blocks until the child exits.
use crate::util::truncate_string;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

const MAX_FAILURE_OUTPUT_BYTES: usize = 2000;

/// A program plus arguments, run from the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Build an invocation from a base command (argv words) and extra args.
    pub fn new<I, S>(base: Vec<String>, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words = base.into_iter();
        let program = words
            .next()
            .ok_or_else(|| anyhow!("command is empty"))?;
        let mut all_args: Vec<String> = words.collect();
        all_args.extend(args.into_iter().map(Into::into));
        Ok(Self {
            program,
            args: all_args,
        })
    }

    /// Render the command line as a user would type it.
    pub fn command_line(&self) -> String {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.as_str());
        words.extend(self.args.iter().map(String::as_str));
        shell_words::join(words)
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

pub trait CommandRunner {
    fn run(&mut self, invocation: &Invocation, cwd: &Path) -> Result<RunOutput>;
}

/// Runs invocations as real child processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation, cwd: &Path) -> Result<RunOutput> {
        let program = resolve_program(&invocation.program, cwd)?;
        let start = Instant::now();
        let output = Command::new(&program)
            .args(&invocation.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("spawn {}", program.display()))?;
        let elapsed_ms = start.elapsed().as_millis();

        tracing::info!(
            program = %invocation.program,
            elapsed_ms,
            exit_code = ?output.status.code(),
            "command finished"
        );

        Ok(RunOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Resolve bare program names on `PATH`; paths are taken relative to `cwd`.
fn resolve_program(program: &str, cwd: &Path) -> Result<PathBuf> {
    let as_path = Path::new(program);
    if as_path.components().count() > 1 || as_path.is_absolute() {
        let resolved = if as_path.is_absolute() {
            as_path.to_path_buf()
        } else {
            cwd.join(as_path)
        };
        if !resolved.exists() {
            return Err(anyhow!("{} does not exist", resolved.display()));
        }
        return Ok(resolved);
    }
    which::which(program).with_context(|| format!("{program} not found on PATH"))
}

/// Run an invocation and turn a non-zero exit into an error.
pub fn run_checked(
    runner: &mut dyn CommandRunner,
    invocation: &Invocation,
    cwd: &Path,
) -> Result<RunOutput> {
    let command_line = invocation.command_line();
    tracing::debug!(command = %command_line, "running command");
    let output = runner
        .run(invocation, cwd)
        .with_context(|| format!("run `{command_line}`"))?;
    if output.success {
        return Ok(output);
    }
    let detail = if output.stderr.trim().is_empty() {
        output.stdout.trim()
    } else {
        output.stderr.trim()
    };
    let status = output
        .exit_code
        .map(|code| code.to_string())
        .unwrap_or_else(|| "signal".to_string());
    Err(anyhow!(
        "`{}` failed with exit status {}: {}",
        command_line,
        status,
        truncate_string(detail, MAX_FAILURE_OUTPUT_BYTES)
    ))
}
