//! Runtime configuration
//!
//! Resolved once at startup from command-line flags and environment and
//! passed down from there.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::cache::{self, Cache, Materializer};
use crate::error::Result;
use crate::fetch::{DEFAULT_TIMEOUT, HttpArchiveSource};
use crate::git::{Libgit2Remote, LsRemote, RefResolver};
use crate::repository::DEFAULT_SERVER;

/// Environment variable overriding the cache root
pub const CACHE_DIR_ENV: &str = "CROSS_REPO_CACHE_DIR";

/// Environment variable overriding the forge base URL
pub const SERVER_ENV: &str = "CROSS_REPO_SERVER";

/// How refs are resolved to commits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RefBackend {
    /// Run `git ls-remote`
    #[default]
    Git,
    /// Talk to the remote in-process via libgit2
    Libgit2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub cache_root: PathBuf,
    pub server: String,
    pub timeout: Duration,
    pub ref_backend: RefBackend,
}

impl Config {
    /// Defaults, with the cache under the platform cache directory
    pub fn new() -> Result<Self> {
        Ok(Self::with_cache_root(cache::default_root()?))
    }

    pub fn with_cache_root(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
            server: DEFAULT_SERVER.to_string(),
            timeout: DEFAULT_TIMEOUT,
            ref_backend: RefBackend::default(),
        }
    }

    pub fn cache(&self) -> Cache {
        Cache::new(&self.cache_root)
    }

    /// The ref resolver selected by [`Config::ref_backend`]
    pub fn resolver(&self) -> Box<dyn RefResolver> {
        match self.ref_backend {
            RefBackend::Git => Box::new(LsRemote::new()),
            RefBackend::Libgit2 => Box::new(Libgit2Remote::new()),
        }
    }

    /// A materializer downloading over HTTP into this cache
    pub fn materializer(&self) -> Result<Materializer> {
        let source = HttpArchiveSource::new(self.timeout)?;
        Ok(Materializer::new(self.cache(), source))
    }
}
