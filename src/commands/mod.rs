//! Command implementations for the cross-repo CLI

pub mod cache;
pub mod completions;
pub mod fetch;
pub mod path;
pub mod resolve;
pub mod version;

use cross_repo::error::{CrossRepoError, Result};

/// Report each failed identifier on stderr and keep the successes in input order.
///
/// Returns `Incomplete` as the second element when anything failed, so
/// callers can print what did succeed before failing the command.
pub(crate) fn partition_results<T>(
    identifiers: &[String],
    results: Vec<Result<T>>,
) -> (Vec<T>, Option<CrossRepoError>) {
    let total = results.len();
    let mut succeeded = Vec::with_capacity(total);

    for (identifier, result) in identifiers.iter().zip(results) {
        match result {
            Ok(value) => succeeded.push(value),
            Err(e) => eprintln!("Error: {identifier}: {e}"),
        }
    }

    let failed = total - succeeded.len();
    let incomplete = (failed > 0).then_some(CrossRepoError::Incomplete { failed, total });
    (succeeded, incomplete)
}
