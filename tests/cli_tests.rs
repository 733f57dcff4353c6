//! CLI integration tests using the real cross-repo binary
//!
//! None of these reach the network: identifiers either name a commit id
//! directly or resolve against a local repository over `file://`.

mod common;

use assert_cmd::Command;
use common::{TestCache, file_url, init_remote};
use predicates::prelude::*;

const SHA: &str = "1234567890abcdef1234567890abcdef12345678";

/// Unroutable server, so any accidental network access fails fast
const NO_SERVER: &str = "http://127.0.0.1:9";

#[allow(deprecated)]
fn cross_repo_cmd(cache: &TestCache) -> Command {
    let mut cmd = Command::cargo_bin("cross-repo").unwrap();
    cmd.env_remove("CROSS_REPO_CACHE_DIR")
        .env_remove("CROSS_REPO_SERVER")
        .env_remove("RUST_LOG")
        .arg("--cache-dir")
        .arg(&cache.root);
    cmd
}

#[test]
fn test_help_output() {
    cross_repo_cmd(&TestCache::new())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("cache"));
}

#[test]
fn test_version_output() {
    cross_repo_cmd(&TestCache::new())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cross-repo"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_resolve_commit_id_offline() {
    cross_repo_cmd(&TestCache::new())
        .args(["--server", NO_SERVER, "resolve", &format!("manageiq-api@{SHA}")])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("ManageIQ/manageiq-api@{SHA}\n")));
}

#[test]
fn test_resolve_json() {
    let output = cross_repo_cmd(&TestCache::new())
        .args(["resolve", "--json", &format!("manageiq@{SHA}")])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let report = &json[0];
    assert_eq!(report["org"], "ManageIQ");
    assert_eq!(report["repo"], "manageiq");
    assert_eq!(report["ref"], SHA);
    assert_eq!(report["sha"], SHA);
    assert_eq!(report["core"], true);
    assert_eq!(
        report["tarball_url"],
        format!("https://github.com/ManageIQ/manageiq/tarball/{SHA}")
    );
}

#[test]
fn test_resolve_branch_against_local_server() {
    let server = tempfile::TempDir::new().unwrap();
    let oid = init_remote(server.path(), "ManageIQ", "manageiq");

    cross_repo_cmd(&TestCache::new())
        .args(["--server", &file_url(server.path())])
        .args(["--ref-backend", "libgit2", "resolve", "manageiq", "manageiq@v1.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "ManageIQ/manageiq@{oid}\nManageIQ/manageiq@{oid}\n"
        )));
}

#[test]
fn test_resolve_unknown_branch_fails() {
    let server = tempfile::TempDir::new().unwrap();
    init_remote(server.path(), "ManageIQ", "manageiq");

    cross_repo_cmd(&TestCache::new())
        .args(["--server", &file_url(server.path())])
        .args(["--ref-backend", "libgit2", "resolve", "manageiq@no-such-branch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No ref named 'no-such-branch'"));
}

#[test]
fn test_path_prints_cache_location() {
    let cache = TestCache::new();
    let expected = cache.root.join("my-org").join(format!("plugin@{SHA}"));

    cross_repo_cmd(&cache)
        .args(["--server", NO_SERVER, "path", &format!("my-org/plugin@{SHA}")])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", expected.display())));
}

#[test]
fn test_path_rejects_relative_components() {
    let cache = TestCache::new();

    for identifier in [format!("../escaped@{SHA}"), format!("ManageIQ/..@{SHA}")] {
        cross_repo_cmd(&cache)
            .args(["--server", NO_SERVER, "path", &identifier])
            .assert()
            .failure()
            .stderr(predicate::str::contains(format!(
                "Invalid repository identifier '{identifier}'"
            )));
    }
    assert!(!cache.root.exists());
}

#[test]
fn test_zero_timeout_is_rejected() {
    cross_repo_cmd(&TestCache::new())
        .args(["--server", NO_SERVER, "--timeout", "0", "fetch", &format!("manageiq@{SHA}")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--timeout"));
}

#[test]
fn test_fetch_uses_cached_snapshot() {
    let cache = TestCache::new();
    let seeded = cache.seed("ManageIQ", "manageiq", SHA, &[("README.md", "cached")]);

    cross_repo_cmd(&cache)
        .args(["--server", NO_SERVER, "fetch", &format!("manageiq@{SHA}")])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "ManageIQ/manageiq@{SHA}\t{}\n",
            seeded.display()
        )));
}

#[test]
fn test_fetch_reports_every_failure() {
    let cache = TestCache::new();
    let seeded = cache.seed("ManageIQ", "manageiq", SHA, &[]);

    cross_repo_cmd(&cache)
        .args(["--server", NO_SERVER, "fetch", "ManageIQ/", &format!("manageiq@{SHA}"), "a/b/c"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(seeded.display().to_string()))
        .stderr(predicate::str::contains("Invalid repository identifier 'ManageIQ/'"))
        .stderr(predicate::str::contains("Invalid repository identifier 'a/b/c'"))
        .stderr(predicate::str::contains("repository name may not contain '/'"))
        .stderr(predicate::str::contains("Failed to materialize 2 of 3 repositories"));
}

#[test]
fn test_fetch_download_failure_leaves_cache_clean() {
    let cache = TestCache::new();

    cross_repo_cmd(&cache)
        .args(["--server", NO_SERVER, "--timeout", "5", "fetch", &format!("manageiq@{SHA}")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to download"));

    assert!(!cache.root.join("ManageIQ").join(format!("manageiq@{SHA}")).exists());
    assert!(cache.staging_dirs().is_empty());
}

#[test]
fn test_cache_stats_empty() {
    cross_repo_cmd(&TestCache::new())
        .arg("cache")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache Statistics"))
        .stdout(predicate::str::contains("Snapshots: 0"))
        .stdout(predicate::str::contains("Cache is empty."));
}

#[test]
fn test_cache_list() {
    let cache = TestCache::new();
    cache.seed("ManageIQ", "manageiq", SHA, &[("README.md", "hello")]);
    cache.seed("ManageIQ", "manageiq-api", "abc123", &[]);

    cross_repo_cmd(&cache)
        .args(["cache", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Repositories: 2"))
        .stdout(predicate::str::contains("Snapshots: 2"))
        .stdout(predicate::str::contains(format!("ManageIQ/manageiq@{SHA} (5 B)")))
        .stdout(predicate::str::contains("ManageIQ/manageiq-api@abc123"));
}

#[test]
fn test_cache_dir_from_env() {
    let cache = TestCache::new();
    let seeded = cache.seed("ManageIQ", "manageiq", SHA, &[]);

    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("cross-repo").unwrap();
    cmd.env("CROSS_REPO_CACHE_DIR", &cache.root)
        .env_remove("CROSS_REPO_SERVER")
        .args(["path", &format!("manageiq@{SHA}")])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", seeded.display())));
}

#[test]
fn test_completions_bash() {
    cross_repo_cmd(&TestCache::new())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cross-repo"));
}

#[test]
fn test_completions_unknown_shell() {
    cross_repo_cmd(&TestCache::new())
        .args(["completions", "tcsh"])
        .assert()
        .failure();
}
