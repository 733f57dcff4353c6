//! Resolve command: pin identifiers to commits without downloading

use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;

use cross_repo::error::{CrossRepoError, Result};
use cross_repo::{Cache, Config, Repository};

use super::partition_results;
use crate::cli::ResolveArgs;

/// Descriptor plus the values derived from it
#[derive(Debug, Serialize)]
struct RepositoryReport {
    #[serde(flatten)]
    repository: Repository,
    url: String,
    tarball_url: String,
    core: bool,
    path: PathBuf,
}

impl RepositoryReport {
    fn new(repository: Repository, cache: &Cache) -> Self {
        Self {
            url: repository.url(),
            tarball_url: repository.tarball_url(),
            core: repository.is_core(),
            path: cache.entry_path(&repository),
            repository,
        }
    }
}

pub fn run(config: &Config, args: &ResolveArgs) -> Result<()> {
    let resolver = config.resolver();

    let results: Vec<Result<Repository>> = args
        .identifiers
        .par_iter()
        .map(|identifier| Repository::new(identifier, &config.server, resolver.as_ref()))
        .collect();

    let (resolved, incomplete) = partition_results(&args.identifiers, results);

    if args.json {
        let cache = config.cache();
        let reports: Vec<RepositoryReport> = resolved
            .into_iter()
            .map(|repository| RepositoryReport::new(repository, &cache))
            .collect();
        let json = serde_json::to_string_pretty(&reports).map_err(|e| {
            CrossRepoError::Serialization {
                reason: e.to_string(),
            }
        })?;
        println!("{json}");
    } else {
        for repository in resolved {
            println!("{repository}");
        }
    }

    incomplete.map_or(Ok(()), Err)
}
