//! CLI argument parsing for the starter installer.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "starter",
    version,
    about = "Install the Laravel starter pack into an existing project",
    after_help = "Commands:\n  install            Run the install sequence (safe to re-run)\n  status             Show which install steps are still pending\n\nExamples:\n  starter install\n  starter install --skip-packages --skip-docs\n  starter install --project ../shop --no-interaction\n  starter status --json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Install(InstallArgs),
    Status(StatusArgs),
}

/// Install command inputs.
#[derive(Parser, Debug)]
#[command(about = "Install the Laravel starter pack")]
pub struct InstallArgs {
    /// Laravel project root (must contain composer.json)
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Skip installing Composer/NPM packages
    #[arg(long)]
    pub skip_packages: bool,

    /// Skip migrating to Pest
    #[arg(long)]
    pub skip_pest: bool,

    /// Skip VitePress documentation setup
    #[arg(long)]
    pub skip_docs: bool,

    /// Answer every prompt with its default
    #[arg(long, env = "STARTER_NO_INTERACTION")]
    pub no_interaction: bool,
}

/// Status command inputs.
#[derive(Parser, Debug)]
#[command(about = "Report which install steps are applied or pending")]
pub struct StatusArgs {
    /// Laravel project root (must contain composer.json)
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}
