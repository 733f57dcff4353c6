//! Resolved repository descriptors
//!
//! A [`Repository`] is an [`Identifier`] placed on a forge with its ref pinned
//! to a commit. It is built once and never changes afterwards.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::cancel::Cancellation;
use crate::error::{CrossRepoError, Result};
use crate::git::RefResolver;
use crate::identifier::{Identifier, is_commit_id};

/// Forge used when no server is given
pub const DEFAULT_SERVER: &str = "https://github.com";

/// Name of the umbrella project; see [`Repository::is_core`]
pub const CORE_REPO: &str = "manageiq";

/// A repository on a forge, pinned to a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub server: String,
    pub org: String,
    pub repo: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub sha: String,
}

impl Repository {
    /// Parse `identifier` and resolve it against `server`
    pub fn new(identifier: &str, server: &str, resolver: &dyn RefResolver) -> Result<Self> {
        Self::resolve(Identifier::parse(identifier)?, server, resolver)
    }

    /// Resolve a parsed identifier's ref to a commit
    pub fn resolve(identifier: Identifier, server: &str, resolver: &dyn RefResolver) -> Result<Self> {
        Self::resolve_with(identifier, server, resolver, &Cancellation::new())
    }

    /// Like [`Repository::resolve`], giving up once `cancel` fires
    pub fn resolve_with(
        identifier: Identifier,
        server: &str,
        resolver: &dyn RefResolver,
        cancel: &Cancellation,
    ) -> Result<Self> {
        let Identifier { org, repo, git_ref } = identifier;
        let url = join_url(server, &[&org, &repo]);
        let sha = ref_to_sha(resolver, &url, &git_ref, cancel)?;

        Ok(Self {
            server: server.to_string(),
            org,
            repo,
            git_ref,
            sha,
        })
    }

    /// `org/repo`
    pub fn name(&self) -> String {
        format!("{}/{}", self.org, self.repo)
    }

    /// Canonical web/clone URL: `server/org/repo`
    pub fn url(&self) -> String {
        join_url(&self.server, &[&self.org, &self.repo])
    }

    /// Archive endpoint for the human ref: `server/org/repo/tarball/ref`
    pub fn tarball_url(&self) -> String {
        join_url(&self.url(), &["tarball", &self.git_ref])
    }

    /// Whether this is the umbrella project itself rather than a plugin
    pub fn is_core(&self) -> bool {
        self.repo.eq_ignore_ascii_case(CORE_REPO)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.org, self.repo, self.sha)
    }
}

fn ref_to_sha(
    resolver: &dyn RefResolver,
    url: &str,
    git_ref: &str,
    cancel: &Cancellation,
) -> Result<String> {
    if is_commit_id(git_ref) {
        debug!(url, git_ref, "ref is already a commit id");
        return Ok(git_ref.to_string());
    }

    cancel.check("ref resolution")?;

    match resolver.resolve_ref(url, git_ref)? {
        Some(sha) if is_commit_id(&sha) => {
            debug!(url, git_ref, %sha, "resolved ref");
            Ok(sha)
        }
        // The commit id becomes part of the cache path
        Some(sha) if !sha.is_empty() => Err(CrossRepoError::RefQueryFailed {
            url: url.to_string(),
            git_ref: git_ref.to_string(),
            reason: format!("remote returned an invalid commit id: {sha}"),
        }),
        _ => Err(CrossRepoError::RefNotFound {
            url: url.to_string(),
            git_ref: git_ref.to_string(),
        }),
    }
}

/// Join URL path segments with single slashes
fn join_url(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.push_str(segment.trim_matches('/'));
    }
    url
}
