//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - fetch: Fetch command arguments
//! - resolve: Resolve command arguments
//! - path: Path command arguments
//! - cache: Cache command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cross_repo::RefBackend;
use cross_repo::config::{CACHE_DIR_ENV, SERVER_ENV};
use cross_repo::repository::DEFAULT_SERVER;

pub mod cache;
pub mod completions;
pub mod fetch;
pub mod path;
pub mod resolve;

pub use cache::{CacheArgs, CacheSubcommand};
pub use completions::CompletionsArgs;
pub use fetch::FetchArgs;
pub use path::PathArgs;
pub use resolve::ResolveArgs;

/// cross-repo - repository snapshots for cross-repo testing
#[derive(Parser, Debug)]
#[command(
    name = "cross-repo",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Fetch forge repositories at a ref into a local snapshot cache",
    long_about = "cross-repo resolves identifiers like ManageIQ/manageiq@master to a commit and \
                  makes that commit's tree available under the cache directory, downloading the \
                  forge tarball only when the commit is not cached yet.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  cross-repo fetch manageiq                     \x1b[90m# ManageIQ/manageiq@master\x1b[0m\n   \
                  cross-repo fetch manageiq-api@ivanchuk        \x1b[90m# A plugin at a branch\x1b[0m\n   \
                  cross-repo resolve ManageIQ/manageiq@v1.0.0   \x1b[90m# Print the commit only\x1b[0m\n   \
                  cross-repo path manageiq@1234abcd             \x1b[90m# Where a commit is cached\x1b[0m\n   \
                  cross-repo cache list                         \x1b[90m# List cached snapshots\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Snapshot cache directory
    #[arg(long, global = true, env = CACHE_DIR_ENV, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Forge base URL
    #[arg(long, global = true, env = SERVER_ENV, default_value = DEFAULT_SERVER)]
    pub server: String,

    /// HTTP timeout for archive downloads, in seconds
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// How refs are resolved to commits
    #[arg(long, global = true, value_enum, default_value_t = RefBackend::Git)]
    pub ref_backend: RefBackend,

    /// Enable verbose output (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve identifiers and make their snapshots available
    Fetch(FetchArgs),

    /// Resolve identifiers to commits without downloading
    Resolve(ResolveArgs),

    /// Print the cache path an identifier resolves to
    Path(PathArgs),

    /// Inspect the snapshot cache
    #[command(name = "cache")]
    Cache(CacheArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
