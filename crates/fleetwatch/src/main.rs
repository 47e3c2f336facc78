// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fleetwatch - a chat assistant for metro fleet maintenance data.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod report;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fleetwatch_config::{ConfigError, FleetwatchConfig};

/// Fleetwatch - a chat assistant for metro fleet maintenance data.
#[derive(Parser, Debug)]
#[command(name = "fleetwatch", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the chat bot.
    Serve,
    /// Validate the configuration, load the data file and print the fleet summary.
    Check,
    /// Print the certificate expiry alerts for today.
    Alerts {
        /// Look-ahead window in days (defaults to `alerts.window_days`).
        #[arg(long)]
        days: Option<u32>,
    },
}

fn load_config(path: Option<&std::path::Path>) -> Result<FleetwatchConfig, Vec<ConfigError>> {
    match path {
        Some(path) => fleetwatch_config::load_and_validate_path(path),
        None => fleetwatch_config::load_and_validate(),
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
pub(crate) fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fleetwatch={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            fleetwatch_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => {
            if let Err(errors) = fleetwatch_config::validate_for_serve(&config) {
                fleetwatch_config::render_errors(&errors);
                std::process::exit(1);
            }
            serve::run_serve(config).await
        }
        Some(Commands::Check) => report::run_check(&config).await,
        Some(Commands::Alerts { days }) => report::run_alerts(&config, days).await,
        None => {
            println!("fleetwatch: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
