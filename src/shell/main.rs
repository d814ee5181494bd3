use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use leave_applications::shell::cli::{self, Cli};
use leave_applications::shell::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if !cli::run(cli, config).await? {
        std::process::exit(1);
    }
    Ok(())
}
