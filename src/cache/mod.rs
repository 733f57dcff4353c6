//! Snapshot cache for cross-repo
//!
//! Snapshots are plain directory trees, one per resolved commit.
//!
//! ## Cache Structure
//!
//! ```text
//! <cache root>/
//! ├── .staging-XXXXXX/          (in-flight extraction, removed when done)
//! └── <org>/
//!     └── <repo>@<commit>/
//!         └── <repository tree>
//! ```
//!
//! The entry path depends only on org, repo and commit, never on the ref
//! that was asked for, so `master` and the commit it points at share an
//! entry. The cache is append-only: nothing here removes entries.

mod materialize;

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

pub use materialize::Materializer;

use crate::error::{CrossRepoError, Result, filesystem};
use crate::repository::Repository;

/// Default cache directory name under the user's cache directory
const CACHE_DIR: &str = "cross-repo";

/// Snapshots subdirectory within the default cache directory
const REPOS_DIR: &str = "repos";

/// Prefix of staging directories created under the cache root
pub const STAGING_PREFIX: &str = ".staging-";

/// Get the default cache root
///
/// Returns `~/.cache/cross-repo/repos` on Linux or the platform equivalent.
pub fn default_root() -> Result<PathBuf> {
    let base = dirs::cache_dir().ok_or(CrossRepoError::CacheDirUnavailable)?;
    Ok(base.join(CACHE_DIR).join(REPOS_DIR))
}

/// Path of the snapshot for `org/repo` at `sha` under `root`
pub fn entry_path(root: &Path, org: &str, repo: &str, sha: &str) -> PathBuf {
    root.join(org).join(format!("{repo}@{sha}"))
}

/// A cache rooted at a fixed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cache {
    root: PathBuf,
}

impl Cache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where `repository` lives (or would live) in this cache
    pub fn entry_path(&self, repository: &Repository) -> PathBuf {
        entry_path(
            &self.root,
            &repository.org,
            &repository.repo,
            &repository.sha,
        )
    }

    /// Whether a snapshot for `repository` is present.
    ///
    /// Presence is trusted as completeness; contents are not verified.
    pub fn contains(&self, repository: &Repository) -> bool {
        self.entry_path(repository).exists()
    }

    /// List every snapshot in the cache, sorted by org, repo and commit
    pub fn entries(&self) -> Result<Vec<CacheEntry>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();

        for org_dir in read_visible_dirs(&self.root)? {
            let org = file_name(&org_dir);
            for snapshot in read_visible_dirs(&org_dir)? {
                let dir_name = file_name(&snapshot);
                let Some((repo, sha)) = dir_name.rsplit_once('@') else {
                    continue;
                };
                entries.push(CacheEntry {
                    org: org.clone(),
                    repo: repo.to_string(),
                    sha: sha.to_string(),
                    size: dir_size(&snapshot)?,
                    path: snapshot,
                });
            }
        }

        entries.sort_by(|a, b| (&a.org, &a.repo, &a.sha).cmp(&(&b.org, &b.repo, &b.sha)));
        Ok(entries)
    }

    /// Get cache statistics
    pub fn stats(&self) -> Result<CacheStats> {
        let entries = self.entries()?;

        let mut names: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.org.as_str(), e.repo.as_str()))
            .collect();
        names.dedup();

        Ok(CacheStats {
            repositories: names.len(),
            snapshots: entries.len(),
            total_size: entries.iter().map(|e| e.size).sum(),
        })
    }
}

/// One cached snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub org: String,
    pub repo: String,
    pub sha: String,
    pub path: PathBuf,
    /// Total size in bytes
    pub size: u64,
}

impl CacheEntry {
    /// `org/repo@sha`
    pub fn name(&self) -> String {
        format!("{}/{}@{}", self.org, self.repo, self.sha)
    }

    pub fn formatted_size(&self) -> String {
        format_size(self.size)
    }
}

/// Cache statistics
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of distinct `org/repo` pairs
    pub repositories: usize,
    /// Number of cached commits
    pub snapshots: usize,
    /// Total size in bytes
    pub total_size: u64,
}

impl CacheStats {
    /// Format total size as human-readable string
    pub fn formatted_size(&self) -> String {
        format_size(self.total_size)
    }
}

#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let size = bytes as f64;
    if size < KB {
        format!("{bytes} B")
    } else if size < KB * KB {
        format!("{:.1} KB", size / KB)
    } else if size < KB * KB * KB {
        format!("{:.1} MB", size / (KB * KB))
    } else {
        format!("{:.1} GB", size / (KB * KB * KB))
    }
}

/// Subdirectories of `dir`, skipping dot-prefixed ones (staging areas)
fn read_visible_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| filesystem(dir, e))? {
        let entry = entry.map_err(|e| filesystem(dir, e))?;
        let path = entry.path();
        if path.is_dir() && !file_name(&path).starts_with('.') {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Calculate directory size recursively
fn dir_size(path: &Path) -> Result<u64> {
    let mut size = 0;
    for entry in WalkDir::new(path) {
        let entry = entry.map_err(|e| filesystem(path, e))?;
        if entry.file_type().is_file() {
            size += entry.metadata().map_err(|e| filesystem(entry.path(), e))?.len();
        }
    }
    Ok(size)
}
