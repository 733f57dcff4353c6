//! Path command: where an identifier's snapshot lives

use cross_repo::error::Result;
use cross_repo::{Config, Repository};

use crate::cli::PathArgs;

pub fn run(config: &Config, args: &PathArgs) -> Result<()> {
    let resolver = config.resolver();
    let repository = Repository::new(&args.identifier, &config.server, resolver.as_ref())?;
    println!("{}", config.cache().entry_path(&repository).display());
    Ok(())
}
