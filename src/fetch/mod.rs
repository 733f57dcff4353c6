//! Archive download
//!
//! This module handles:
//! - The [`ArchiveSource`] seam that hands out a gzip-compressed tar stream
//! - Downloading forge tarballs over HTTP ([`HttpArchiveSource`])
//! - Unpacking those tarballs into a staging directory ([`extract`])

pub mod extract;

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{CrossRepoError, Result};

const USER_AGENT: &str = concat!("cross-repo/", env!("CARGO_PKG_VERSION"));

/// Default per-request timeout for archive downloads
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Something that can open a `.tar.gz` byte stream for a URL
pub trait ArchiveSource: Send + Sync {
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>>;
}

impl<T: ArchiveSource + ?Sized> ArchiveSource for Box<T> {
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>> {
        (**self).open(url)
    }
}

impl<T: ArchiveSource + ?Sized> ArchiveSource for std::sync::Arc<T> {
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>> {
        (**self).open(url)
    }
}

/// Streams archives from the forge with a blocking HTTP client
#[derive(Debug, Clone)]
pub struct HttpArchiveSource {
    client: Client,
}

impl HttpArchiveSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CrossRepoError::HttpClient {
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl ArchiveSource for HttpArchiveSource {
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>> {
        let fetch_failed = |e: reqwest::Error| CrossRepoError::FetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(fetch_failed)?
            .error_for_status()
            .map_err(fetch_failed)?;
        debug!(url, final_url = %response.url(), "archive response");

        Ok(Box::new(response))
    }
}
