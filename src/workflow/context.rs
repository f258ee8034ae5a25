use crate::config::{self, StarterConfig, Tool};
use crate::integrations::Integrations;
use crate::paths::ProjectPaths;
use crate::process::{run_checked, CommandRunner, Invocation, RunOutput};
use crate::prompt::Confirm;
use anyhow::{anyhow, Context, Result};
use std::cell::OnceCell;
use std::fs;
use std::path::Path;

/// A resolved Laravel project plus the installer config that applies to it.
pub(crate) struct Project {
    pub(crate) paths: ProjectPaths,
    pub(crate) config: StarterConfig,
    integrations: OnceCell<Integrations>,
}

impl Project {
    /// Resolve `root` and require it to look like a Laravel project.
    pub(crate) fn load(root: &Path) -> Result<Self> {
        let root = fs::canonicalize(root)
            .with_context(|| format!("resolve project root {}", root.display()))?;
        let paths = ProjectPaths::new(root);
        if !paths.composer_json().is_file() {
            return Err(anyhow!(
                "no composer.json in {}; run starter from a Laravel project root",
                paths.root().display()
            ));
        }
        let config = config::load_config(&paths)?;
        Ok(Self::new(paths, config))
    }

    pub(crate) fn new(paths: ProjectPaths, config: StarterConfig) -> Self {
        Self {
            paths,
            config,
            integrations: OnceCell::new(),
        }
    }

    /// Integration registry, resolved on first use and then reused.
    pub(crate) fn integrations(&self) -> Result<&Integrations> {
        if let Some(registry) = self.integrations.get() {
            return Ok(registry);
        }
        let detected = Integrations::detect(&self.paths)?;
        tracing::debug!(
            source = ?detected.source(),
            present = ?detected.present().collect::<Vec<_>>(),
            "resolved integrations"
        );
        Ok(self.integrations.get_or_init(|| detected))
    }
}

/// Which skippable steps the operator opted out of.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct InstallOptions {
    pub(crate) skip_packages: bool,
    pub(crate) skip_pest: bool,
    pub(crate) skip_docs: bool,
}

/// Mutable state handed to step actions.
pub(crate) struct StepContext<'a> {
    pub(crate) project: &'a Project,
    pub(crate) options: InstallOptions,
    runner: &'a mut dyn CommandRunner,
    prompt: &'a mut dyn Confirm,
    warnings: Vec<String>,
}

impl<'a> StepContext<'a> {
    pub(crate) fn new(
        project: &'a Project,
        options: InstallOptions,
        runner: &'a mut dyn CommandRunner,
        prompt: &'a mut dyn Confirm,
    ) -> Self {
        Self {
            project,
            options,
            runner,
            prompt,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn paths(&self) -> &'a ProjectPaths {
        let project: &'a Project = self.project;
        &project.paths
    }

    /// Report a soft failure on stderr; the run continues.
    pub(crate) fn warn(&mut self, message: &str) {
        tracing::warn!("{message}");
        eprintln!("warning: {message}");
        self.warnings.push(message.to_string());
    }

    /// Warnings reported so far in this run.
    pub(crate) fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub(crate) fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        self.prompt.confirm(question, default)
    }

    /// Run a configured tool with `args`; a non-zero exit is an error.
    pub(crate) fn run_tool(&mut self, tool: Tool, args: &[&str]) -> Result<RunOutput> {
        let base = self.project.config.command(tool)?;
        let invocation = Invocation::new(base, args.iter().copied())?;
        self.run(&invocation)
    }

    /// Run `php artisan <args> --no-interaction`.
    pub(crate) fn artisan(&mut self, args: &[&str]) -> Result<RunOutput> {
        let mut full = Vec::with_capacity(args.len() + 2);
        full.push("artisan");
        full.extend_from_slice(args);
        if !args.contains(&"--no-interaction") {
            full.push("--no-interaction");
        }
        self.run_tool(Tool::Php, &full)
    }

    pub(crate) fn run(&mut self, invocation: &Invocation) -> Result<RunOutput> {
        let root = self.project.paths.root();
        run_checked(&mut *self.runner, invocation, root)
    }
}
