// storefront_cli/src/main.rs

mod cli;
mod commands;
mod state;
mod terminal;

use crate::cli::Cli;
use crate::state::AppState;

use anyhow::Context;
use clap::Parser;
use storefront::config::parse_base_url;
use storefront::ClientConfig;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  // Logs go to stderr so command output stays pipeable.
  tracing_subscriber::fmt()
    .with_env_filter(log_filter(cli.verbose, std::env::var("RUST_LOG").ok().as_deref()))
    .with_span_events(FmtSpan::CLOSE)
    .with_writer(std::io::stderr)
    .init();

  let mut config = ClientConfig::from_env().context("Failed to load storefront configuration")?;
  if let Some(url) = cli.api_url.as_deref() {
    config.api_base_url = parse_base_url(url)?;
  }
  if let Some(token) = cli.token.clone() {
    config.api_token = Some(token);
  }
  if let Some(rate) = cli.tax_rate {
    config.tax_rate = rate;
  }
  tracing::debug!(api_base_url = %config.api_base_url, "Configuration resolved.");

  let app_state = AppState::build(&config, cli.yes)?;
  commands::dispatch(&app_state, cli.command, cli.json).await
}

/// WARN by default, DEBUG with `--verbose`; RUST_LOG directives override either.
fn log_filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
  let level = if verbose { Level::DEBUG } else { Level::WARN };
  EnvFilter::builder()
    .with_default_directive(LevelFilter::from_level(level).into())
    .parse_lossy(directives.unwrap_or_default())
}
