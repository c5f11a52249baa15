//! git::interface
//!
//! Git data source implementation using git2.
//!
//! This module is the single doorway to repository access. No other module
//! imports `git2` directly, which keeps error handling consistent and the
//! strong-type guarantees at one boundary.
//!
//! # Concurrency
//!
//! `git2::Repository` is `Send` but not `Sync`, so the handle lives behind a
//! `Mutex` and every query runs on the tokio blocking pool. The source only
//! reads; queries never mutate the repository.
//!
//! # Example
//!
//! ```ignore
//! use revline::git::{Git, GitSource};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let commits = git.rev_list("HEAD", false).await?;
//! println!("{} commits", commits.len());
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::source::{GitError, GitSource, LocalChanges};
use crate::core::types::{Commit, Oid, RefName};

/// git2-backed implementation of [`GitSource`].
pub struct Git {
    /// The underlying git2 repository, guarded for cross-thread use.
    repo: Arc<Mutex<git2::Repository>>,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git").finish_non_exhaustive()
    }
}

impl Git {
    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root, so
    /// `path` can be any directory within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self {
            repo: Arc::new(Mutex::new(repo)),
        })
    }

    /// Path to the working directory root.
    pub fn work_dir(&self) -> Result<std::path::PathBuf, GitError> {
        let repo = self.repo.lock().map_err(|_| GitError::Internal {
            message: "repository lock poisoned".to_string(),
        })?;
        repo.workdir()
            .map(Path::to_path_buf)
            .ok_or(GitError::BareRepo)
    }

    /// Run a query on the blocking pool with the repository lock held.
    async fn with_repo<T, F>(&self, query: F) -> Result<T, GitError>
    where
        T: Send + 'static,
        F: FnOnce(&git2::Repository) -> Result<T, GitError> + Send + 'static,
    {
        let repo = Arc::clone(&self.repo);
        tokio::task::spawn_blocking(move || {
            let guard: MutexGuard<'_, git2::Repository> =
                repo.lock().map_err(|_| GitError::Internal {
                    message: "repository lock poisoned".to_string(),
                })?;
            query(&guard)
        })
        .await
        .map_err(|e| GitError::Internal {
            message: format!("blocking task failed: {e}"),
        })?
    }
}

/// Map an unexpected git2 error into the internal variant.
fn internal(err: git2::Error) -> GitError {
    GitError::Internal {
        message: err.message().to_string(),
    }
}

/// Resolve a single revision expression to a commit id.
fn resolve_commit(repo: &git2::Repository, rev: &str) -> Result<git2::Oid, GitError> {
    let object = repo
        .revparse_single(rev)
        .map_err(|e| match e.code() {
            git2::ErrorCode::NotFound | git2::ErrorCode::InvalidSpec => {
                GitError::RevisionNotFound {
                    rev: rev.to_string(),
                }
            }
            _ => internal(e),
        })?;

    let commit = object
        .peel(git2::ObjectType::Commit)
        .map_err(|_| GitError::RevisionNotFound {
            rev: rev.to_string(),
        })?;

    Ok(commit.id())
}

/// Load the (hash, author date) pair for a commit id.
fn load_commit(repo: &git2::Repository, oid: git2::Oid) -> Result<Commit, GitError> {
    let commit = repo.find_commit(oid).map_err(internal)?;
    let date = DateTime::from_timestamp(commit.author().when().seconds(), 0)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .with_timezone(&Utc);

    Ok(Commit {
        hash: Oid::new(oid.to_string())?,
        date,
    })
}

/// Walk history for a revision expression, most-recent-first.
///
/// Supports `A`, `A..B`, and `A...B` forms. An empty repository yields an
/// empty list regardless of the expression.
fn rev_list_impl(
    repo: &git2::Repository,
    expr: &str,
    first_parent: bool,
) -> Result<Vec<Commit>, GitError> {
    if repo.is_empty().map_err(internal)? {
        return Ok(Vec::new());
    }

    let mut walk = repo.revwalk().map_err(internal)?;
    if first_parent {
        walk.simplify_first_parent().map_err(internal)?;
    }

    if let Some((base, tip)) = expr.split_once("...") {
        // Symmetric difference: both sides minus their merge base
        let base_oid = resolve_commit(repo, base)?;
        let tip_oid = resolve_commit(repo, tip)?;
        walk.push(base_oid).map_err(internal)?;
        walk.push(tip_oid).map_err(internal)?;
        if let Ok(merge_base) = repo.merge_base(base_oid, tip_oid) {
            walk.hide(merge_base).map_err(internal)?;
        }
    } else if let Some((base, tip)) = expr.split_once("..") {
        walk.push(resolve_commit(repo, tip)?).map_err(internal)?;
        walk.hide(resolve_commit(repo, base)?).map_err(internal)?;
    } else {
        walk.push(resolve_commit(repo, expr)?).map_err(internal)?;
    }

    let mut commits = Vec::new();
    for oid in walk {
        let oid = oid.map_err(internal)?;
        commits.push(load_commit(repo, oid)?);
    }

    Ok(commits)
}

/// Resolve a revision expression to its full hash, absent when unresolvable.
fn sha1_impl(repo: &git2::Repository, rev: &str) -> Result<Option<Oid>, GitError> {
    match resolve_commit(repo, rev) {
        Ok(oid) => Ok(Some(Oid::new(oid.to_string())?)),
        Err(GitError::RevisionNotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// The branch HEAD points at, tolerating unborn HEADs in fresh repositories.
fn head_branch_name_impl(repo: &git2::Repository) -> Result<Option<String>, GitError> {
    match repo.head() {
        Ok(head) => {
            if head.is_branch() {
                Ok(head.shorthand().map(String::from))
            } else {
                // Detached HEAD
                Ok(None)
            }
        }
        Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
            // Fresh repository: HEAD is symbolic but the branch has no commit
            let head = repo.find_reference("HEAD").map_err(internal)?;
            Ok(head
                .symbolic_target()
                .and_then(|target| target.strip_prefix("refs/heads/"))
                .map(String::from))
        }
        Err(e) => Err(internal(e)),
    }
}

/// Summarize uncommitted changes to tracked files.
///
/// Untracked files do not make the tree dirty.
fn local_changes_impl(repo: &git2::Repository) -> Result<LocalChanges, GitError> {
    let mut opts = git2::StatusOptions::new();
    opts.include_untracked(false).include_ignored(false);

    let statuses = repo.statuses(Some(&mut opts)).map_err(internal)?;

    let mut staged = 0;
    let mut unstaged = 0;
    for entry in statuses.iter() {
        let status = entry.status();

        if status.is_index_new()
            || status.is_index_modified()
            || status.is_index_deleted()
            || status.is_index_renamed()
            || status.is_index_typechange()
        {
            staged += 1;
        }

        if status.is_wt_modified()
            || status.is_wt_deleted()
            || status.is_wt_renamed()
            || status.is_wt_typechange()
        {
            unstaged += 1;
        }
    }

    if staged == 0 && unstaged == 0 {
        Ok(LocalChanges::Clean)
    } else {
        Ok(LocalChanges::Uncommitted { staged, unstaged })
    }
}

/// Candidate refs for a branch: local first, then remote-tracking with
/// origin preferred.
fn branch_local_or_remote_impl(
    repo: &git2::Repository,
    branch: &str,
) -> Result<Vec<RefName>, GitError> {
    let mut candidates = Vec::new();

    let local = RefName::for_branch(branch);
    if repo.find_reference(local.as_str()).is_ok() {
        candidates.push(local);
    }

    let pattern = format!("refs/remotes/*/{branch}");
    let refs = repo.references_glob(&pattern).map_err(internal)?;

    let mut tracking = Vec::new();
    for reference in refs {
        let reference = reference.map_err(internal)?;
        // Skip refs with non-UTF8 or otherwise invalid names
        if let Some(name) = reference.name() {
            if let Ok(refname) = RefName::new(name) {
                tracking.push(refname);
            }
        }
    }
    tracking.sort_by_key(|refname| {
        let origin = RefName::for_remote_branch("origin", branch);
        (*refname != origin, refname.as_str().to_string())
    });

    candidates.extend(tracking);
    Ok(candidates)
}

#[async_trait]
impl GitSource for Git {
    async fn rev_list(&self, rev: &str, first_parent: bool) -> Result<Vec<Commit>, GitError> {
        let rev = rev.to_string();
        self.with_repo(move |repo| rev_list_impl(repo, &rev, first_parent))
            .await
    }

    async fn sha1(&self, rev: &str) -> Result<Option<Oid>, GitError> {
        let rev = rev.to_string();
        self.with_repo(move |repo| sha1_impl(repo, &rev)).await
    }

    async fn head_branch_name(&self) -> Result<Option<String>, GitError> {
        self.with_repo(head_branch_name_impl).await
    }

    async fn local_changes(&self) -> Result<LocalChanges, GitError> {
        self.with_repo(local_changes_impl).await
    }

    async fn branch_local_or_remote(&self, branch: &str) -> Result<Vec<RefName>, GitError> {
        let branch = branch.to_string();
        self.with_repo(move |repo| branch_local_or_remote_impl(repo, &branch))
            .await
    }
}
