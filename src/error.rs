//! Error types and handling for cross-repo
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use std::fmt::Display;
use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for cross-repo operations
#[derive(Error, Diagnostic, Debug)]
pub enum CrossRepoError {
    // Identifier errors
    #[error("Invalid repository identifier '{input}': {reason}")]
    #[diagnostic(
        code(cross_repo::identifier::parse_failed),
        help("Identifiers have the form [org/]repo[@ref], e.g. ManageIQ/manageiq@master")
    )]
    IdentifierParse { input: String, reason: String },

    // Ref resolution errors
    #[error("No ref named '{git_ref}' found at {url}")]
    #[diagnostic(
        code(cross_repo::git::ref_not_found),
        help("Check that the branch or tag exists on the remote")
    )]
    RefNotFound { url: String, git_ref: String },

    #[error("Failed to query refs for '{git_ref}' at {url}: {reason}")]
    #[diagnostic(code(cross_repo::git::ref_query_failed))]
    RefQueryFailed {
        url: String,
        git_ref: String,
        reason: String,
    },

    // Download errors
    #[error("Failed to download {url}: {reason}")]
    #[diagnostic(
        code(cross_repo::fetch::failed),
        help("Check network access to the forge and retry")
    )]
    FetchFailed { url: String, reason: String },

    #[error("Failed to set up HTTP client: {reason}")]
    #[diagnostic(code(cross_repo::fetch::client))]
    HttpClient { reason: String },

    #[error("Unexpected archive contents from {url}: {reason}")]
    #[diagnostic(code(cross_repo::fetch::archive_format))]
    ArchiveFormat { url: String, reason: String },

    // File system errors
    #[error("Filesystem operation failed at {path}: {reason}")]
    #[diagnostic(code(cross_repo::fs::failed))]
    Filesystem { path: String, reason: String },

    // Cache errors
    #[error("Could not determine cache directory")]
    #[diagnostic(
        code(cross_repo::cache::dir_unavailable),
        help("Set CROSS_REPO_CACHE_DIR or pass --cache-dir")
    )]
    CacheDirUnavailable,

    #[error("{operation} was cancelled")]
    #[diagnostic(code(cross_repo::cancelled))]
    Cancelled { operation: String },

    #[error("Failed to materialize {failed} of {total} repositories")]
    #[diagnostic(code(cross_repo::fetch::incomplete))]
    Incomplete { failed: usize, total: usize },

    #[error("Failed to start worker pool: {reason}")]
    #[diagnostic(code(cross_repo::fetch::worker_pool))]
    WorkerPool { reason: String },

    #[error("Failed to serialize output: {reason}")]
    #[diagnostic(code(cross_repo::output::serialize))]
    Serialization { reason: String },
}

impl CrossRepoError {
    /// Whether retrying the same operation may succeed.
    ///
    /// Transport failures are retryable; a ref that does not exist on the
    /// remote is terminal for that ref.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CrossRepoError::RefQueryFailed { .. } | CrossRepoError::FetchFailed { .. }
        )
    }
}

/// Creates a filesystem error for `path`
pub fn filesystem(path: &Path, reason: impl Display) -> CrossRepoError {
    CrossRepoError::Filesystem {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an identifier parse error
pub fn identifier_parse(input: &str, reason: impl Into<String>) -> CrossRepoError {
    CrossRepoError::IdentifierParse {
        input: input.to_string(),
        reason: reason.into(),
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, CrossRepoError>;
