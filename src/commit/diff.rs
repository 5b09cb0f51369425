//! Staged diff collection using git2.

use std::path::PathBuf;

use git2::{DiffFormat, ErrorCode, Repository, Tree};
use tracing::warn;

use crate::error::CommitError;

/// Source of the currently staged changes.
pub trait StagedDiffSource {
    /// Unified diff of the index against HEAD.
    fn staged_diff(&self) -> Result<String, CommitError>;
}

/// Reads the staged diff of the repository containing a path.
pub struct RepoDiffSource {
    path: PathBuf,
}

impl RepoDiffSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StagedDiffSource for RepoDiffSource {
    fn staged_diff(&self) -> Result<String, CommitError> {
        let repo = Repository::discover(&self.path).map_err(CommitError::OpenRepository)?;
        collect_staged_diff(&repo)
    }
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found),
/// `Ok(Some(tree))` for repos with a valid HEAD, or `Err(CommitError::DiffFailed)`
/// for real errors (corrupt HEAD, permission issues, missing objects).
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, CommitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(CommitError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(CommitError::DiffFailed)?;
    Ok(Some(tree))
}

/// Collect the staged diff (HEAD tree to index), like `git diff --cached`.
///
/// Returns `CommitError::NoStagedChanges` when nothing is staged.
pub fn collect_staged_diff(repo: &Repository) -> Result<String, CommitError> {
    let head_tree = resolve_head_tree(repo)?;

    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(CommitError::DiffFailed)?;

    if diff.deltas().len() == 0 {
        return Err(CommitError::NoStagedChanges);
    }

    let mut text = String::new();
    if let Err(e) = diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        if matches!(origin, '+' | '-' | ' ') {
            text.push(origin);
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    }) {
        warn!("Failed to render staged diff: {e}");
        return Err(CommitError::DiffFailed(e));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use std::path::Path;

    fn init_with_commit(dir: &Path) -> Repository {
        let repo = Repository::init(dir).unwrap();
        {
            let sig = Signature::now("Test", "test@test.com").unwrap();
            let tree_id = repo.index().unwrap().write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[]).unwrap();
        }
        repo
    }

    fn stage(repo: &Repository, name: &str) {
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
    }

    #[test]
    fn test_clean_repo_has_no_staged_changes() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_with_commit(dir.path());

        let result = collect_staged_diff(&repo);
        assert!(matches!(result, Err(CommitError::NoStagedChanges)));
    }

    #[test]
    fn test_untracked_file_is_not_staged() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_with_commit(dir.path());
        std::fs::write(dir.path().join("new.txt"), "hello\n").unwrap();

        let result = collect_staged_diff(&repo);
        assert!(matches!(result, Err(CommitError::NoStagedChanges)));
    }

    #[test]
    fn test_staged_new_file_appears_in_diff() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_with_commit(dir.path());
        std::fs::write(dir.path().join("new.txt"), "hello world\n").unwrap();
        stage(&repo, "new.txt");

        let diff = collect_staged_diff(&repo).unwrap();
        assert!(diff.contains("new.txt"));
        assert!(diff.contains("+hello world"));
    }

    #[test]
    fn test_only_staged_changes_are_included() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_with_commit(dir.path());
        std::fs::write(dir.path().join("staged.txt"), "staged\n").unwrap();
        std::fs::write(dir.path().join("unstaged.txt"), "unstaged\n").unwrap();
        stage(&repo, "staged.txt");

        let diff = collect_staged_diff(&repo).unwrap();
        assert!(diff.contains("staged.txt"));
        assert!(!diff.contains("unstaged.txt"));
    }

    #[test]
    fn test_unborn_head_diffs_against_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("first.txt"), "first\n").unwrap();
        stage(&repo, "first.txt");

        let diff = collect_staged_diff(&repo).unwrap();
        assert!(diff.contains("+first"));
    }

    #[test]
    fn test_corrupt_head_propagates_error() {
        let dir = tempfile::tempdir().unwrap();
        init_with_commit(dir.path());

        // Corrupt HEAD by pointing it to a non-existent ref
        std::fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/\0invalid").unwrap();

        let repo = Repository::open(dir.path()).unwrap();
        let result = collect_staged_diff(&repo);
        assert!(
            matches!(result, Err(CommitError::DiffFailed(_))),
            "Expected DiffFailed for corrupt HEAD, got: {:?}",
            result
        );
    }

    #[test]
    fn test_repo_diff_source_outside_repo_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = RepoDiffSource::new(dir.path());
        let result = source.staged_diff();
        assert!(matches!(result, Err(CommitError::OpenRepository(_))));
    }
}
