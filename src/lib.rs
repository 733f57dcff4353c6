//! cross-repo - forge repository snapshots on demand
//!
//! Turns identifiers like `ManageIQ/manageiq@master` into an immutable
//! directory tree at `<cache root>/<org>/<repo>@<commit>`, downloading the
//! forge tarball only when that commit is not cached yet.
//!
//! ```no_run
//! use cross_repo::{Config, Repository};
//!
//! # fn main() -> cross_repo::Result<()> {
//! let config = Config::new()?;
//! let resolver = config.resolver();
//! let repository = Repository::new("manageiq-api@master", &config.server, &resolver)?;
//! let path = config.materializer()?.ensure_available(&repository)?;
//! println!("{repository} is at {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cancel;
pub mod config;
pub mod error;
pub mod fetch;
pub mod git;
pub mod identifier;
pub mod repository;

pub use cache::{Cache, Materializer};
pub use cancel::Cancellation;
pub use config::{Config, RefBackend};
pub use error::{CrossRepoError, Result};
pub use fetch::{ArchiveSource, HttpArchiveSource};
pub use git::RefResolver;
pub use identifier::Identifier;
pub use repository::Repository;
