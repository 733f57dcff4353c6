//! Common test utilities for cross-repo integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use cross_repo::{ArchiveSource, RefResolver, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

/// A temporary cache root
pub struct TestCache {
    pub temp: TempDir,
    pub root: PathBuf,
}

impl TestCache {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().join("repos");
        Self { temp, root }
    }

    /// Lay down a snapshot directly, as if an earlier run had fetched it
    pub fn seed(&self, org: &str, repo: &str, sha: &str, files: &[(&str, &str)]) -> PathBuf {
        let path = self.root.join(org).join(format!("{repo}@{sha}"));
        std::fs::create_dir_all(&path).expect("Failed to create snapshot directory");
        for (name, contents) in files {
            let file = path.join(name);
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create parent directory");
            }
            std::fs::write(file, contents).expect("Failed to write file");
        }
        path
    }

    /// Names of leftover staging directories under the root
    pub fn staging_dirs(&self) -> Vec<String> {
        std::fs::read_dir(&self.root)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .filter(|name| name.starts_with(".staging-"))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Build an in-memory `.tar.gz` from `(path, contents)` pairs
pub fn tarball(files: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (path, contents) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, path, contents.as_bytes())
            .expect("Failed to append tar entry");
    }
    builder
        .into_inner()
        .and_then(GzEncoder::finish)
        .expect("Failed to finish tarball")
}

/// Answers ref queries from a fixed table and records every call
#[derive(Default)]
pub struct StubRemote {
    refs: HashMap<String, String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubRemote {
    pub fn new(refs: &[(&str, &str)]) -> Self {
        Self {
            refs: refs
                .iter()
                .map(|(name, sha)| ((*name).to_string(), (*sha).to_string()))
                .collect(),
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }
}

impl RefResolver for StubRemote {
    fn resolve_ref(&self, url: &str, git_ref: &str) -> Result<Option<String>> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push((url.to_string(), git_ref.to_string()));
        Ok(self.refs.get(git_ref).cloned())
    }
}

/// Serves one archive for every URL and records which URLs were opened
#[derive(Default)]
pub struct StubArchives {
    data: Vec<u8>,
    opened: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl StubArchives {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().expect("urls lock poisoned").clone()
    }
}

impl ArchiveSource for StubArchives {
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.urls
            .lock()
            .expect("urls lock poisoned")
            .push(url.to_string());
        Ok(Box::new(Cursor::new(self.data.clone())))
    }
}

/// Create a repository at `<base>/<org>/<repo>` with one commit on `master`
/// and a lightweight tag `v1.0.0`, returning the commit id
pub fn init_remote(base: &Path, org: &str, repo: &str) -> String {
    let path = base.join(org).join(repo);
    std::fs::create_dir_all(&path).expect("Failed to create remote directory");

    let repository = git2::Repository::init(&path).expect("Failed to init repository");
    let sig = git2::Signature::now("Test", "test@test.com").expect("Failed to create signature");
    let tree_id = repository
        .index()
        .and_then(|mut index| index.write_tree())
        .expect("Failed to write tree");
    let tree = repository.find_tree(tree_id).expect("Failed to find tree");
    let oid = repository
        .commit(Some("refs/heads/master"), &sig, &sig, "Initial commit", &tree, &[])
        .expect("Failed to commit");

    repository
        .reference("refs/tags/v1.0.0", oid, false, "tag")
        .expect("Failed to tag");

    oid.to_string()
}

/// `file://` URL of a local directory
pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}
