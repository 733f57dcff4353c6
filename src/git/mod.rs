//! Remote ref resolution
//!
//! This module handles:
//! - The [`RefResolver`] seam used to turn a ref name into a commit id
//! - Resolving refs with `git ls-remote` ([`LsRemote`])
//! - Resolving refs over libgit2 without spawning git ([`Libgit2Remote`])
//!
//! Authentication for the libgit2 backend is delegated to git's native system:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Environment variables (`GIT_SSH_COMMAND`, etc.)

mod auth;
mod error;
mod refs;
mod remote;

use std::sync::Arc;

pub use refs::{LsRemote, parse_ls_remote_output};
pub use remote::Libgit2Remote;

use crate::error::Result;

/// Query a remote for the commit a ref points at.
///
/// Implementations return `Ok(None)` when the remote has no ref with that
/// name, and an error only when the query itself failed.
pub trait RefResolver: Send + Sync {
    fn resolve_ref(&self, url: &str, git_ref: &str) -> Result<Option<String>>;
}

impl<T: RefResolver + ?Sized> RefResolver for &T {
    fn resolve_ref(&self, url: &str, git_ref: &str) -> Result<Option<String>> {
        (**self).resolve_ref(url, git_ref)
    }
}

impl<T: RefResolver + ?Sized> RefResolver for Box<T> {
    fn resolve_ref(&self, url: &str, git_ref: &str) -> Result<Option<String>> {
        (**self).resolve_ref(url, git_ref)
    }
}

impl<T: RefResolver + ?Sized> RefResolver for Arc<T> {
    fn resolve_ref(&self, url: &str, git_ref: &str) -> Result<Option<String>> {
        (**self).resolve_ref(url, git_ref)
    }
}

/// A single advertised ref: `(refname, commit id)`
pub(crate) type AdvertisedRef = (String, String);

/// Whether `refname` matches `pattern` the way `git ls-remote <pattern>` does:
/// an exact match, or a match of the trailing path components.
pub(crate) fn ref_matches(refname: &str, pattern: &str) -> bool {
    refname == pattern
        || refname
            .strip_suffix(pattern)
            .is_some_and(|prefix| prefix.ends_with('/'))
}

/// Pick the commit for `pattern` from advertised refs, in advertised order.
///
/// Annotated tags are advertised twice (`refs/tags/v1` pointing at the tag
/// object, `refs/tags/v1^{}` at the commit); the peeled entry wins. This
/// deliberately differs from taking the first `ls-remote` line: snapshots
/// are keyed by commit, never by tag object id.
pub(crate) fn select_ref(refs: &[AdvertisedRef], pattern: &str) -> Option<String> {
    let (name, oid) = refs
        .iter()
        .find(|(name, _)| !name.ends_with("^{}") && ref_matches(name, pattern))?;

    let peeled = format!("{name}^{{}}");
    let commit = refs
        .iter()
        .find(|(candidate, _)| *candidate == peeled)
        .map_or(oid, |(_, peeled_oid)| peeled_oid);

    Some(commit.clone())
}
