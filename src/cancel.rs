//! Caller-supplied cancellation and deadlines for network operations

use std::io::{self, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{CrossRepoError, Result};

/// Shared cancellation signal with an optional deadline.
///
/// Clones share the same flag, so one clone can be handed to a worker and
/// another kept by the caller to cancel it.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// A signal that never fires unless [`Cancellation::cancel`] is called
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire automatically once `deadline` has passed
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Fire automatically `timeout` from now
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Return `Cancelled` for `operation` if the signal has fired
    pub fn check(&self, operation: &str) -> Result<()> {
        if self.is_cancelled() {
            return Err(CrossRepoError::Cancelled {
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    /// Wrap a reader so every read fails once the signal has fired
    pub fn guard<R: Read>(&self, inner: R) -> Guarded<R> {
        Guarded {
            inner,
            cancel: self.clone(),
        }
    }
}

/// Reader returned by [`Cancellation::guard`]
pub struct Guarded<R> {
    inner: R,
    cancel: Cancellation,
}

impl<R: Read> Read for Guarded<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.cancel.is_cancelled() {
            return Err(io::Error::other("operation cancelled"));
        }
        self.inner.read(buf)
    }
}
