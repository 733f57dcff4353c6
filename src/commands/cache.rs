//! Cache command: read-only view of the snapshot cache

use cross_repo::error::Result;
use cross_repo::{Cache, Config};

use crate::cli::{CacheArgs, CacheSubcommand};

pub fn run(config: &Config, args: &CacheArgs) -> Result<()> {
    let cache = config.cache();

    show_cache_stats(&cache)?;

    if let Some(CacheSubcommand::List) = args.command {
        println!();
        list_snapshots(&cache)?;
    }

    Ok(())
}

fn show_cache_stats(cache: &Cache) -> Result<()> {
    let stats = cache.stats()?;

    println!("Cache Statistics:");
    println!("  Location: {}", cache.root().display());
    println!("  Repositories: {}", stats.repositories);
    println!("  Snapshots: {}", stats.snapshots);
    println!("  Size: {}", stats.formatted_size());

    if stats.snapshots == 0 {
        println!("\nCache is empty.");
    }

    Ok(())
}

fn list_snapshots(cache: &Cache) -> Result<()> {
    let entries = cache.entries()?;

    if entries.is_empty() {
        println!("No cached snapshots.");
        return Ok(());
    }

    println!("Cached snapshots ({}):", entries.len());
    for entry in &entries {
        println!("  {} ({})", entry.name(), entry.formatted_size());
        println!("    Path: {}", entry.path.display());
    }

    Ok(())
}
