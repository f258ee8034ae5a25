//! The fixed install sequence.
//!
//! Each step pairs a read-only check with an action. The check is derived
//! from the project's current files on every run; nothing is recorded
//! between runs.
use super::context::{Project, StepContext};
use crate::config::Tool;
use crate::guidelines;
use crate::integrations::Integration;
use crate::manifest::Manifest;
use crate::paths::{self, GITKEEP};
use crate::process::Invocation;
use crate::templates;
use crate::util::{display_path, write_file, write_if_missing};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;

pub(crate) const PRODUCTION_PACKAGES: [&str; 8] = [
    "filament/filament",
    "laravel/horizon",
    "laravel/pulse",
    "laravel/telescope",
    "spatie/laravel-data",
    "spatie/laravel-backup",
    "predis/predis",
    "sentry/sentry-laravel",
];

pub(crate) const DEVELOPMENT_PACKAGES: [&str; 4] = [
    "laravel/boost",
    "pestphp/pest",
    "larastan/larastan",
    "barryvdh/laravel-ide-helper",
];

pub(crate) const PEST_MISSING_WARNING: &str = "Pest not found. Skipping migration.";

pub(crate) const DOCS_TOOLING_PACKAGE: &str = "vitepress";

pub(crate) const DOCS_PROMPT: &str = "Set up VitePress documentation site?";

pub(crate) const DOCS_SCRIPTS: [(&str, &str); 3] = [
    ("docs:dev", "vitepress dev docs-site"),
    ("docs:build", "vitepress build docs-site"),
    ("docs:preview", "vitepress preview docs-site"),
];

const STUB_FILES: [(&str, &str); 2] = [
    (paths::PHPSTAN_NEON_REL, templates::PHPSTAN_NEON),
    (paths::CI_WORKFLOW_REL, templates::CI_WORKFLOW_YML),
];

/// Artisan commands run for each present integration, in order.
pub(crate) const PUBLISH_COMMANDS: [(Integration, &str, &[&str]); 5] = [
    (
        Integration::AdminPanel,
        "Installing Filament",
        &["filament:install", "--panels"],
    ),
    (
        Integration::QueueDashboard,
        "Installing Horizon",
        &["horizon:install"],
    ),
    (
        Integration::DebugDashboard,
        "Installing Telescope",
        &["telescope:install"],
    ),
    (
        Integration::PerformanceDashboard,
        "Publishing Pulse config",
        &[
            "vendor:publish",
            "--provider=Laravel\\Pulse\\PulseServiceProvider",
        ],
    ),
    (
        Integration::ErrorTracking,
        "Publishing Sentry config",
        &["sentry:publish", "--dsn="],
    ),
];

pub(crate) const MIGRATE_COMMAND: &[&str] = &["migrate"];

pub(crate) const IDE_HELPER_COMMANDS: [&[&str]; 2] = [&["ide-helper:generate"], &["ide-helper:meta"]];

fn composer_scripts() -> Vec<(&'static str, Value)> {
    vec![
        (
            "test",
            json!(["@php artisan config:clear --ansi", "@php artisan test"]),
        ),
        (
            "analyse",
            json!(["vendor/bin/phpstan analyse --memory-limit=1G"]),
        ),
    ]
}

/// Operator flag that turns a step off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SkipFlag {
    Packages,
    Pest,
    Docs,
}

impl SkipFlag {
    pub(crate) fn flag(self) -> &'static str {
        match self {
            SkipFlag::Packages => "--skip-packages",
            SkipFlag::Pest => "--skip-pest",
            SkipFlag::Docs => "--skip-docs",
        }
    }
}

/// Result of a step's idempotency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum StepState {
    /// Nothing left to do.
    Applied,
    /// The action would change the project.
    Pending,
    /// No persistent marker; the action runs every time.
    Always,
    /// The step's precondition does not hold; the action would do nothing.
    NotApplicable,
}

pub(crate) type CheckFn = fn(&Project) -> Result<StepState>;
pub(crate) type ApplyFn = fn(&mut StepContext<'_>) -> Result<()>;

pub(crate) struct Step {
    pub(crate) id: &'static str,
    pub(crate) title: &'static str,
    pub(crate) skip: Option<SkipFlag>,
    pub(crate) check: CheckFn,
    pub(crate) apply: ApplyFn,
}

pub(crate) const STEPS: &[Step] = &[
    Step {
        id: "directories",
        title: "Directory structure",
        skip: None,
        check: check_directories,
        apply: apply_directories,
    },
    Step {
        id: "config-files",
        title: "Configuration files",
        skip: None,
        check: check_config_files,
        apply: apply_config_files,
    },
    Step {
        id: "composer-scripts",
        title: "Composer scripts",
        skip: None,
        check: check_composer_scripts,
        apply: apply_composer_scripts,
    },
    Step {
        id: "packages",
        title: "Composer and NPM packages",
        skip: Some(SkipFlag::Packages),
        check: check_packages,
        apply: apply_packages,
    },
    Step {
        id: "pest",
        title: "Pest migration",
        skip: Some(SkipFlag::Pest),
        check: check_pest,
        apply: apply_pest,
    },
    Step {
        id: "docs-site",
        title: "VitePress documentation site",
        skip: Some(SkipFlag::Docs),
        check: check_docs_site,
        apply: apply_docs_site,
    },
    Step {
        id: "publish-assets",
        title: "Package assets",
        skip: None,
        check: check_publish_assets,
        apply: apply_publish_assets,
    },
    Step {
        id: "ide-helpers",
        title: "IDE helpers",
        skip: None,
        check: check_ide_helpers,
        apply: apply_ide_helpers,
    },
    Step {
        id: "guidelines",
        title: "Agent guidelines",
        skip: None,
        check: check_guidelines,
        apply: apply_guidelines,
    },
];

fn state_from(done: bool) -> StepState {
    if done {
        StepState::Applied
    } else {
        StepState::Pending
    }
}

fn check_directories(project: &Project) -> Result<StepState> {
    let done = project
        .paths
        .app_directories()
        .iter()
        .all(|dir| dir.is_dir());
    Ok(state_from(done))
}

fn apply_directories(ctx: &mut StepContext<'_>) -> Result<()> {
    println!("Creating directory structure...");
    let paths = ctx.paths();
    for dir in paths.app_directories() {
        if dir.is_dir() {
            continue;
        }
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        write_file(&dir.join(GITKEEP), "")?;
        println!("  created: {}", display_path(&dir, Some(paths.root())));
    }
    Ok(())
}

fn check_config_files(project: &Project) -> Result<StepState> {
    let root = project.paths.root();
    let done = STUB_FILES.iter().all(|(rel, _)| root.join(rel).exists());
    Ok(state_from(done))
}

fn apply_config_files(ctx: &mut StepContext<'_>) -> Result<()> {
    println!("Copying configuration files...");
    let root = ctx.paths().root();
    for (rel, contents) in STUB_FILES {
        if write_if_missing(&root.join(rel), contents)? {
            println!("  created: {rel}");
        }
    }
    Ok(())
}

fn check_composer_scripts(project: &Project) -> Result<StepState> {
    let manifest = Manifest::load(&project.paths.composer_json())?;
    let done = composer_scripts()
        .iter()
        .all(|(name, _)| manifest.script(name).is_some());
    Ok(state_from(done))
}

fn apply_composer_scripts(ctx: &mut StepContext<'_>) -> Result<()> {
    println!("Adding Composer scripts...");
    let mut manifest = Manifest::load(&ctx.paths().composer_json())?;
    let mut changed = false;
    for (name, commands) in composer_scripts() {
        if manifest.ensure_script(name, commands)? {
            println!("  added: scripts.{name}");
            changed = true;
        }
    }
    if changed {
        manifest.save()?;
    }
    Ok(())
}

/// Which of the three package invocations still have something to add.
struct PackageNeeds {
    production: bool,
    development: bool,
    docs_tooling: bool,
}

impl PackageNeeds {
    fn inspect(project: &Project) -> Result<Self> {
        let composer = Manifest::load(&project.paths.composer_json())?;
        let npm = Manifest::load_optional(&project.paths.package_json())?;
        let docs_declared = npm.as_ref().is_some_and(|manifest| {
            manifest.declares("devDependencies", DOCS_TOOLING_PACKAGE)
                || manifest.declares("dependencies", DOCS_TOOLING_PACKAGE)
        });
        Ok(Self {
            production: !PRODUCTION_PACKAGES
                .iter()
                .all(|package| composer.declares("require", package)),
            development: !DEVELOPMENT_PACKAGES
                .iter()
                .all(|package| composer.declares("require-dev", package)),
            docs_tooling: !docs_declared,
        })
    }

    fn satisfied(&self) -> bool {
        !self.production && !self.development && !self.docs_tooling
    }
}

fn check_packages(project: &Project) -> Result<StepState> {
    Ok(state_from(PackageNeeds::inspect(project)?.satisfied()))
}

fn apply_packages(ctx: &mut StepContext<'_>) -> Result<()> {
    let needs = PackageNeeds::inspect(ctx.project)?;

    println!("Installing Composer packages...");
    if needs.production {
        println!("  Installing production packages...");
        let mut args = vec!["require"];
        args.extend(PRODUCTION_PACKAGES);
        ctx.run_tool(Tool::Composer, &args)?;
    }
    if needs.development {
        println!("  Installing development packages...");
        let mut args = vec!["require", "--dev"];
        args.extend(DEVELOPMENT_PACKAGES);
        ctx.run_tool(Tool::Composer, &args)?;
    }

    println!("Installing NPM packages...");
    if needs.docs_tooling {
        println!("  Installing VitePress...");
        ctx.run_tool(Tool::Npm, &["install", "-D", DOCS_TOOLING_PACKAGE])?;
    }
    Ok(())
}

/// A config file alone is not enough: without the binary the action still
/// has to run so the missing binary is reported.
fn check_pest(project: &Project) -> Result<StepState> {
    let paths = &project.paths;
    Ok(state_from(
        paths.pest_binary().exists() && paths.pest_config().exists(),
    ))
}

fn apply_pest(ctx: &mut StepContext<'_>) -> Result<()> {
    let paths = ctx.paths();
    if !paths.pest_binary().exists() {
        ctx.warn(PEST_MISSING_WARNING);
        return Ok(());
    }

    println!("Configuring Pest...");
    let pest_config = paths.pest_config();
    if write_if_missing(&pest_config, templates::PEST_PHP)? {
        println!("  created: {}", paths::PEST_CONFIG_REL);
    }
    if !pest_config.exists() {
        let pest = display_path(&paths.pest_binary(), Some(paths.root()));
        ctx.run(&Invocation::new(vec![pest], ["--init"])?)?;
    }
    Ok(())
}

fn docs_scripts_current(manifest: &Manifest) -> bool {
    DOCS_SCRIPTS
        .iter()
        .all(|(name, command)| manifest.script(name) == Some(&Value::from(*command)))
}

fn check_docs_site(project: &Project) -> Result<StepState> {
    if !project.paths.docs_site_dir().is_dir() {
        return Ok(StepState::Pending);
    }
    let done = match Manifest::load_optional(&project.paths.package_json())? {
        Some(manifest) => docs_scripts_current(&manifest),
        None => true,
    };
    Ok(state_from(done))
}

fn apply_docs_site(ctx: &mut StepContext<'_>) -> Result<()> {
    if !ctx.confirm(DOCS_PROMPT, true)? {
        println!("Skipping VitePress documentation setup.");
        return Ok(());
    }

    println!("Setting up VitePress documentation...");
    let paths = ctx.paths();
    let docs_dir = paths.docs_site_dir();
    if !docs_dir.is_dir() {
        for (rel, contents) in templates::DOCS_SITE_FILES {
            write_file(&docs_dir.join(rel), contents)?;
        }
        println!("  created: {}", paths::DOCS_SITE_REL);
    }

    if let Some(mut manifest) = Manifest::load_optional(&paths.package_json())? {
        for (name, command) in DOCS_SCRIPTS {
            manifest.set_script(name, Value::from(command))?;
        }
        manifest.save()?;
        println!(
            "  updated: {}",
            display_path(manifest.path(), Some(paths.root()))
        );
    }
    Ok(())
}

fn check_publish_assets(_project: &Project) -> Result<StepState> {
    Ok(StepState::Always)
}

fn apply_publish_assets(ctx: &mut StepContext<'_>) -> Result<()> {
    println!("Publishing package assets...");
    let project = ctx.project;
    let registry = project.integrations()?;
    for (integration, message, args) in PUBLISH_COMMANDS {
        if !registry.contains(integration) {
            continue;
        }
        println!("  {message}...");
        ctx.artisan(args)?;
    }

    println!("  Running migrations...");
    ctx.artisan(MIGRATE_COMMAND)?;
    Ok(())
}

fn check_ide_helpers(project: &Project) -> Result<StepState> {
    if project.integrations()?.contains(Integration::IdeHelper) {
        Ok(StepState::Always)
    } else {
        Ok(StepState::NotApplicable)
    }
}

fn apply_ide_helpers(ctx: &mut StepContext<'_>) -> Result<()> {
    let project = ctx.project;
    if !project.integrations()?.contains(Integration::IdeHelper) {
        return Ok(());
    }

    println!("Generating IDE helpers...");
    for args in IDE_HELPER_COMMANDS {
        ctx.artisan(args)?;
    }
    Ok(())
}

fn check_guidelines(project: &Project) -> Result<StepState> {
    let path = project.paths.guidelines();
    if !path.is_file() {
        return Ok(StepState::NotApplicable);
    }
    let text = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    Ok(state_from(!guidelines::patch_guidelines(&text).changed()))
}

fn apply_guidelines(ctx: &mut StepContext<'_>) -> Result<()> {
    let path = ctx.paths().guidelines();
    let Some(inserted) = guidelines::patch_guidelines_file(&path)? else {
        return Ok(());
    };
    println!("Updating agent guidelines...");
    for block in inserted {
        println!("  added: {}", block.label());
    }
    Ok(())
}

#[cfg(test)]
#[path = "steps_tests.rs"]
mod tests;
