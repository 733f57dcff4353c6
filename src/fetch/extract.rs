//! Tarball extraction into a staging directory
//!
//! Forge archive endpoints wrap the tree in one top-level directory (for
//! example `ManageIQ-manageiq-abc123/`), sometimes next to a
//! `pax_global_header` pseudo-entry carrying the commit id.

use std::fs;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::{Archive, EntryType};

use crate::error::{CrossRepoError, Result, filesystem};

/// Name under which some extractors materialize the pax global header
pub const PAX_GLOBAL_HEADER: &str = "pax_global_header";

/// Why unpacking stopped
#[derive(Debug)]
pub enum UnpackError {
    /// Reading the archive stream itself failed
    Source(String),
    /// The stream is not a well-formed gzip-compressed tar archive
    Corrupt(String),
    /// Writing an extracted entry to disk failed
    Write(String),
}

/// Remembers the first error raised by the underlying stream, so a failed
/// unpack can be attributed to the network rather than the archive or disk
struct Watched<R> {
    inner: R,
    error: Option<String>,
}

impl<R: Read> Read for Watched<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).inspect_err(|e| {
            self.error.get_or_insert_with(|| e.to_string());
        })
    }
}

/// Gunzip and unpack `reader` under `dest`.
///
/// Global pax headers are skipped. Entries that would land outside `dest`
/// (absolute paths, `..`) abort the unpack.
pub fn unpack_tarball<R: Read>(reader: R, dest: &Path) -> std::result::Result<(), UnpackError> {
    let watched = Watched {
        inner: reader,
        error: None,
    };
    let mut archive = Archive::new(GzDecoder::new(watched));
    archive.set_preserve_mtime(true);

    let result = unpack_entries(&mut archive, dest);
    let watched = archive.into_inner().into_inner();

    match (result, watched.error) {
        (Ok(()), _) => Ok(()),
        (Err(_), Some(source)) => Err(UnpackError::Source(source)),
        (Err(e), None) => Err(e),
    }
}

fn unpack_entries<R: Read>(
    archive: &mut Archive<R>,
    dest: &Path,
) -> std::result::Result<(), UnpackError> {
    let corrupt = |e: io::Error| UnpackError::Corrupt(e.to_string());

    for entry in archive.entries().map_err(corrupt)? {
        let mut entry = entry.map_err(corrupt)?;
        if entry.header().entry_type() == EntryType::XGlobalHeader {
            continue;
        }
        let unpacked = entry.unpack_in(dest).map_err(|e| match e.kind() {
            ErrorKind::InvalidData | ErrorKind::InvalidInput | ErrorKind::UnexpectedEof => {
                UnpackError::Corrupt(e.to_string())
            }
            _ => UnpackError::Write(e.to_string()),
        })?;
        if !unpacked {
            let path = entry.path().map_err(corrupt)?.display().to_string();
            return Err(UnpackError::Corrupt(format!(
                "entry escapes the extraction directory: {path}"
            )));
        }
    }
    Ok(())
}

/// Find the single real top-level directory of an unpacked archive.
///
/// `url` is only used for error context.
pub fn locate_content_dir(staging: &Path, url: &str) -> Result<PathBuf> {
    let entries = fs::read_dir(staging).map_err(|e| filesystem(staging, e))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| filesystem(staging, e))?;
        if entry.file_name() != PAX_GLOBAL_HEADER {
            candidates.push(entry.path());
        }
    }

    let format_error = |reason: String| CrossRepoError::ArchiveFormat {
        url: url.to_string(),
        reason,
    };

    match candidates.as_slice() {
        [content] if content.is_dir() => Ok(content.clone()),
        [content] => Err(format_error(format!(
            "top-level entry {} is not a directory",
            content.display()
        ))),
        [] => Err(format_error("archive is empty".to_string())),
        many => Err(format_error(format!(
            "expected one top-level directory, found {}",
            many.len()
        ))),
    }
}
