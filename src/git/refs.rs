//! Ref resolution through `git ls-remote`
//!
//! Resolves a ref to a commit without cloning by asking the remote which refs
//! it advertises.

use std::ffi::OsString;
use std::process::Command;

use tracing::debug;

use super::{AdvertisedRef, RefResolver, select_ref};
use crate::error::{CrossRepoError, Result};
use crate::identifier::is_commit_id;

/// Resolves refs by running `git ls-remote <url> <ref>`
#[derive(Debug, Clone)]
pub struct LsRemote {
    program: OsString,
}

impl Default for LsRemote {
    fn default() -> Self {
        Self {
            program: OsString::from("git"),
        }
    }
}

impl LsRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific git executable instead of `git` from `PATH`
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl RefResolver for LsRemote {
    fn resolve_ref(&self, url: &str, git_ref: &str) -> Result<Option<String>> {
        debug!(url, git_ref, "running git ls-remote");

        let output = Command::new(&self.program)
            .args(["ls-remote", url, git_ref])
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| CrossRepoError::RefQueryFailed {
                url: url.to_string(),
                git_ref: git_ref.to_string(),
                reason: format!("failed to run git ls-remote: {e}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CrossRepoError::RefQueryFailed {
                url: url.to_string(),
                git_ref: git_ref.to_string(),
                reason: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_ls_remote_output(&stdout, git_ref).map_err(|reason| {
            CrossRepoError::RefQueryFailed {
                url: url.to_string(),
                git_ref: git_ref.to_string(),
                reason,
            }
        })
    }
}

/// Parse `git ls-remote` output (`<commit>\t<refname>` per line).
///
/// Returns the commit of the first ref matching `git_ref`, `Ok(None)` when
/// nothing matched, and `Err` with a reason when a line is malformed.
pub fn parse_ls_remote_output(
    stdout: &str,
    git_ref: &str,
) -> std::result::Result<Option<String>, String> {
    let mut refs: Vec<AdvertisedRef> = Vec::new();

    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let mut fields = line.split_whitespace();
        let (Some(sha), Some(name)) = (fields.next(), fields.next()) else {
            return Err(format!("could not parse ls-remote output line: {line}"));
        };
        if !is_commit_id(sha) {
            return Err(format!("invalid commit id from ls-remote: {sha}"));
        }
        refs.push((name.to_string(), sha.to_string()));
    }

    // git has already filtered by pattern; fall back to the first line if its
    // matching rules admitted something ours do not.
    Ok(select_ref(&refs, git_ref).or_else(|| refs.first().map(|(_, sha)| sha.clone())))
}
