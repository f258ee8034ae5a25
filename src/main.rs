use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod guidelines;
mod integrations;
mod manifest;
mod paths;
mod process;
mod prompt;
mod templates;
mod util;
mod workflow;

use cli::{Command, RootArgs};

/// Logs go to stderr so stdout only carries progress text.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "starter=warn".into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing();

    match args.command {
        Command::Install(args) => workflow::run_install(&args),
        Command::Status(args) => workflow::run_status(&args),
    }
}
