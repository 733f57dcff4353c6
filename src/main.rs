//! cross-repo - repository snapshots for cross-repo testing
//!
//! Command line front end over the `cross_repo` library: resolves
//! `[org/]repo[@ref]` identifiers and manages the local snapshot cache.

use std::io::IsTerminal;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod progress;

use cli::{Cli, Commands};
use cross_repo::Config;
use cross_repo::cache;
use cross_repo::error::Result;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cross_repo={level}")));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Turn parsed global options into a [`Config`]
fn build_config(cli: &Cli) -> Result<Config> {
    let cache_root = match &cli.cache_dir {
        Some(dir) => dir.clone(),
        None => cache::default_root()?,
    };

    Ok(Config {
        cache_root,
        server: cli.server.clone(),
        timeout: Duration::from_secs(cli.timeout),
        ref_backend: cli.ref_backend,
    })
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    let show_progress = cli.verbose == 0 && std::io::stderr().is_terminal();

    match cli.command {
        Commands::Fetch(args) => commands::fetch::run(&config, &args, show_progress),
        Commands::Resolve(args) => commands::resolve::run(&config, &args),
        Commands::Path(args) => commands::path::run(&config, &args),
        Commands::Cache(args) => commands::cache::run(&config, &args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(&args),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
