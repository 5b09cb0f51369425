//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use clap::Parser;
use git2::{Oid, Repository, Signature};

use ghw::{Cli, GhCli};

/// Parse a ghw command line (without the program name).
pub fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("ghw").chain(args.iter().copied()))
        .expect("Failed to parse command line")
}

/// A `gh` that cannot be spawned. Any attempt to run it fails.
pub fn unreachable_gh() -> GhCli {
    GhCli::at("/nonexistent/path/to/gh_12345")
}

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write an executable shell script.
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make script executable");
}

/// A stand-in `gh` that records its arguments and exits with a fixed code.
pub struct FakeGh {
    pub dir: tempfile::TempDir,
    pub path: PathBuf,
    log: PathBuf,
}

impl FakeGh {
    #[cfg(unix)]
    pub fn new(exit_code: i32) -> Self {
        let dir = temp_test_dir();
        let path = dir.path().join("gh");
        let log = dir.path().join("gh.log");

        write_script(
            &path,
            &format!("echo \"$@\" >> '{}'\nexit {}", log.display(), exit_code),
        );

        Self { dir, path, log }
    }

    pub fn gh(&self) -> GhCli {
        GhCli::at(&self.path)
    }

    /// One line per invocation, arguments joined by spaces.
    pub fn invocations(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new git repository with one initial commit.
    pub fn new() -> Self {
        let dir = temp_test_dir();
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config
                .set_bool("commit.gpgsign", false)
                .expect("Failed to disable signing");
        }

        let this = Self { dir, repo };
        this.commit_index("initial commit");
        this
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file and add it to the index.
    pub fn stage(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("Failed to write file");
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Commit whatever is in the index. Returns the commit OID.
    pub fn commit_index(&self, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let tree_id = self
            .repo
            .index()
            .expect("Failed to get index")
            .write_tree()
            .expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Message of the commit HEAD points to.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .expect("Failed to read HEAD")
            .peel_to_commit()
            .expect("HEAD is not a commit")
            .message()
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}
