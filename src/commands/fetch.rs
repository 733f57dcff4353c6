//! Fetch command: resolve identifiers and materialize their snapshots

use std::path::PathBuf;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::debug;

use cross_repo::error::{CrossRepoError, Result};
use cross_repo::{Config, Materializer, RefResolver, Repository};

use super::partition_results;
use crate::cli::FetchArgs;
use crate::progress::ProgressDisplay;

pub fn run(config: &Config, args: &FetchArgs, show_progress: bool) -> Result<()> {
    let resolver = config.resolver();
    let materializer = config.materializer()?;

    // 0 lets rayon pick one thread per CPU
    let pool = ThreadPoolBuilder::new()
        .num_threads(args.jobs.unwrap_or(0))
        .build()
        .map_err(|e| CrossRepoError::WorkerPool {
            reason: e.to_string(),
        })?;
    debug!(threads = pool.current_num_threads(), "fetching");

    let progress = ProgressDisplay::new(args.identifiers.len() as u64, show_progress);
    let results: Vec<Result<(Repository, PathBuf)>> = pool.install(|| {
        args.identifiers
            .par_iter()
            .map(|identifier| {
                progress.start(identifier);
                let result =
                    fetch_one(identifier, &config.server, resolver.as_ref(), &materializer);
                progress.inc();
                result
            })
            .collect()
    });

    if results.iter().any(Result::is_err) {
        progress.abandon();
    } else {
        progress.finish();
    }

    let (fetched, incomplete) = partition_results(&args.identifiers, results);
    for (repository, path) in fetched {
        println!("{repository}\t{}", path.display());
    }

    incomplete.map_or(Ok(()), Err)
}

/// Resolve one identifier and make its snapshot available
pub(crate) fn fetch_one(
    identifier: &str,
    server: &str,
    resolver: &dyn RefResolver,
    materializer: &Materializer,
) -> Result<(Repository, PathBuf)> {
    let repository = Repository::new(identifier, server, resolver)?;
    let path = materializer.ensure_available(&repository)?;
    Ok((repository, path))
}
