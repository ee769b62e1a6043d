//! price-monitor - Shop price monitor for a Waybar tooltip
//!
//! Prints a single `{"tooltip": ...}` JSON line on stdout; logs go to stderr.

use anyhow::Result;
use clap::Parser;
use price_monitor::commands::MonitorCommand;
use price_monitor::config::{Config, FailurePolicy};
use std::io::Write;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "price-monitor",
    version,
    about = "Shop price monitor emitting a Waybar tooltip",
    long_about = "Fetches the configured shop items, normalizes their prices to BGN \
                  and prints a Waybar tooltip JSON object."
)]
struct Cli {
    /// Path to config file (default: $XDG_CONFIG_HOME/waybar/modules/custom-price-monitor.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Delay between requests in milliseconds [env: PRICE_MONITOR_DELAY]
    #[arg(long)]
    delay: Option<u64>,

    /// Proxy URL (e.g., socks5://host:port) [env: PRICE_MONITOR_PROXY]
    #[arg(long)]
    proxy: Option<String>,

    /// What to do when an item cannot be priced: abort, skip, placeholder
    /// [env: PRICE_MONITOR_ON_ERROR]
    #[arg(long)]
    on_error: Option<FailurePolicy>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging on stderr; stdout is reserved for Waybar
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides; env values that do not parse are ignored
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(policy) = cli.on_error {
        config.on_error = policy;
    }

    let output = MonitorCommand::new(config).execute().await?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output)?;
    stdout.flush()?;

    Ok(())
}
