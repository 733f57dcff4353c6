//! Ref resolution over libgit2
//!
//! Connects a detached remote and reads the refs it advertises, so no local
//! repository and no git executable are needed.

use git2::{Direction, Remote, RemoteCallbacks};
use tracing::debug;

use super::auth::setup_auth_callbacks;
use super::error::interpret_git_error;
use super::{AdvertisedRef, RefResolver, select_ref};
use crate::error::{CrossRepoError, Result};

/// Resolves refs by listing the remote's advertised refs through libgit2
#[derive(Debug, Clone, Copy, Default)]
pub struct Libgit2Remote;

impl Libgit2Remote {
    pub fn new() -> Self {
        Self
    }

    fn list(url: &str) -> std::result::Result<Vec<AdvertisedRef>, git2::Error> {
        let mut remote = Remote::create_detached(url)?;

        let mut callbacks = RemoteCallbacks::new();
        setup_auth_callbacks(&mut callbacks);

        let connection = remote.connect_auth(Direction::Fetch, Some(callbacks), None)?;
        let heads = connection
            .list()?
            .iter()
            .map(|head| (head.name().to_string(), head.oid().to_string()))
            .collect();

        Ok(heads)
    }
}

impl RefResolver for Libgit2Remote {
    fn resolve_ref(&self, url: &str, git_ref: &str) -> Result<Option<String>> {
        let refs = Self::list(url).map_err(|e| CrossRepoError::RefQueryFailed {
            url: url.to_string(),
            git_ref: git_ref.to_string(),
            reason: interpret_git_error(&e),
        })?;
        debug!(url, count = refs.len(), "listed remote refs");

        Ok(select_ref(&refs, git_ref))
    }
}
