//! Repository identifier parsing
//!
//! An identifier names a repository relative to a forge: `[org/]repo[@ref]`.
//!
//! ```text
//! ManageIQ/manageiq@master   org=ManageIQ  repo=manageiq      ref=master
//! manageiq-api               org=ManageIQ  repo=manageiq-api  ref=master
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{CrossRepoError, Result, identifier_parse};

/// Organization used when the identifier has no `org/` part
pub const DEFAULT_ORG: &str = "ManageIQ";

/// Ref used when the identifier has no `@ref` part
pub const DEFAULT_REF: &str = "master";

/// A parsed, not yet resolved, repository identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub org: String,
    pub repo: String,
    pub git_ref: String,
}

impl Identifier {
    /// Parse `[org/]repo[@ref]`
    ///
    /// Splits on the first `@`, then on the first `/`. Never touches the network.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        let (name, git_ref) = match trimmed.split_once('@') {
            Some((name, git_ref)) => (name, Some(git_ref)),
            None => (trimmed, None),
        };

        let (org, repo) = match name.split_once('/') {
            Some((org, repo)) => (org, repo),
            None => (DEFAULT_ORG, name),
        };

        if org.is_empty() {
            return Err(identifier_parse(input, "organization is empty"));
        }
        if repo.is_empty() {
            return Err(identifier_parse(input, "repository name is missing"));
        }
        if repo.contains('/') {
            return Err(identifier_parse(input, "repository name may not contain '/'"));
        }
        check_path_component(input, "organization", org)?;
        check_path_component(input, "repository name", repo)?;
        if org.starts_with('.') {
            return Err(identifier_parse(input, "organization may not start with '.'"));
        }

        let git_ref = match git_ref {
            Some("") => return Err(identifier_parse(input, "ref after '@' is empty")),
            Some(git_ref) => git_ref,
            None => DEFAULT_REF,
        };

        Ok(Self {
            org: org.to_string(),
            repo: repo.to_string(),
            git_ref: git_ref.to_string(),
        })
    }

    /// `org/repo`
    pub fn name(&self) -> String {
        format!("{}/{}", self.org, self.repo)
    }
}

impl FromStr for Identifier {
    type Err = CrossRepoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.org, self.repo, self.git_ref)
    }
}

/// Org and repo become directories under the cache root, so neither may
/// name a relative directory or carry a separator
fn check_path_component(input: &str, what: &str, value: &str) -> Result<()> {
    if value == "." || value == ".." {
        return Err(identifier_parse(input, format!("{what} may not be '{value}'")));
    }
    if let Some(c) = value.chars().find(|c| *c == '\\' || c.is_control()) {
        return Err(identifier_parse(
            input,
            format!("{what} contains invalid character {c:?}"),
        ));
    }
    Ok(())
}

/// Whether a ref is already a commit id (one or more hex digits, nothing else)
pub fn is_commit_id(git_ref: &str) -> bool {
    !git_ref.is_empty() && git_ref.chars().all(|c| c.is_ascii_hexdigit())
}
