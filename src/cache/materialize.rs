//! Download-and-publish of repository snapshots
//!
//! A snapshot is unpacked into a dot-prefixed staging directory inside the
//! cache root and then renamed into place. The rename is the only step that
//! makes a snapshot visible, so a reader never sees a partial tree.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info, warn};

use super::{Cache, STAGING_PREFIX};
use crate::cancel::Cancellation;
use crate::error::{CrossRepoError, Result, filesystem};
use crate::fetch::ArchiveSource;
use crate::fetch::extract::{UnpackError, locate_content_dir, unpack_tarball};
use crate::repository::Repository;

/// Makes resolved repositories available on disk
pub struct Materializer {
    cache: Cache,
    source: Box<dyn ArchiveSource>,
}

impl Materializer {
    pub fn new(cache: Cache, source: impl ArchiveSource + 'static) -> Self {
        Self {
            cache,
            source: Box::new(source),
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Where `repository` lives (or would live) once available
    pub fn cache_path(&self, repository: &Repository) -> PathBuf {
        self.cache.entry_path(repository)
    }

    /// Ensure the snapshot for `repository` exists and return its path.
    ///
    /// Does nothing when the snapshot is already present.
    pub fn ensure_available(&self, repository: &Repository) -> Result<PathBuf> {
        self.ensure_available_with(repository, &Cancellation::new())
    }

    /// Like [`Materializer::ensure_available`], giving up once `cancel` fires.
    ///
    /// A cancelled or failed call leaves nothing at the snapshot path.
    pub fn ensure_available_with(
        &self,
        repository: &Repository,
        cancel: &Cancellation,
    ) -> Result<PathBuf> {
        let target = self.cache_path(repository);
        if self.cache.contains(repository) {
            debug!(repository = %repository, path = %target.display(), "cache hit");
            return Ok(target);
        }

        cancel.check("download")?;

        let url = repository.tarball_url();
        info!("Fetching {url}");

        let root = self.cache.root();
        fs::create_dir_all(root).map_err(|e| filesystem(root, e))?;

        // Dropping the TempDir removes whatever is left of the staging area
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(root)
            .map_err(|e| filesystem(root, e))?;

        self.download(&url, &staging, cancel)?;
        let content = locate_content_dir(staging.path(), &url)?;

        cancel.check("download")?;
        publish(&content, &target)?;

        debug!(repository = %repository, path = %target.display(), "snapshot published");
        Ok(target)
    }

    fn download(&self, url: &str, staging: &TempDir, cancel: &Cancellation) -> Result<()> {
        let reader = self.source.open(url)?;

        unpack_tarball(cancel.guard(reader), staging.path()).map_err(|e| {
            if cancel.is_cancelled() {
                return CrossRepoError::Cancelled {
                    operation: "download".to_string(),
                };
            }
            match e {
                UnpackError::Source(reason) => CrossRepoError::FetchFailed {
                    url: url.to_string(),
                    reason,
                },
                UnpackError::Corrupt(reason) => CrossRepoError::ArchiveFormat {
                    url: url.to_string(),
                    reason,
                },
                UnpackError::Write(reason) => filesystem(staging.path(), reason),
            }
        })
    }
}

/// Move `content` to `target` in one rename.
///
/// If another process published the same snapshot first, its copy is kept.
fn publish(content: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| filesystem(parent, e))?;
    }

    match fs::rename(content, target) {
        Ok(()) => Ok(()),
        Err(_) if target.exists() => {
            warn!(path = %target.display(), "snapshot was published concurrently; keeping existing copy");
            Ok(())
        }
        Err(e) => Err(filesystem(target, e)),
    }
}
