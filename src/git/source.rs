//! git::source
//!
//! The data-source trait the versioning engine consumes.
//!
//! # Design
//!
//! The `GitSource` trait is async because every query is backed by
//! repository I/O. All methods are read-only; nothing in this crate mutates
//! the repository. The engine is written against this trait so tests can
//! substitute a deterministic in-memory source.
//!
//! # Error Handling
//!
//! Failures are categorized into typed [`GitError`] variants. The error type
//! is `Clone` so a memoized failure can be handed to every caller of the
//! same accessor.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::{Commit, Oid, RefName, TypeError};

/// Errors from git operations.
#[derive(Debug, Clone, Error)]
pub enum GitError {
    /// Not inside a git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// A revision expression did not resolve to a commit.
    #[error("revision not found: {rev}")]
    RevisionNotFound {
        /// The revision expression that failed to resolve
        rev: String,
    },

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Invalid object id or ref name format.
    #[error("invalid identifier: {message}")]
    InvalidIdentifier {
        /// Description of the problem
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        GitError::InvalidIdentifier {
            message: err.to_string(),
        }
    }
}

/// Dirty-state of the working tree.
///
/// Only [`LocalChanges::is_clean`] participates in version-string assembly
/// (the `-dirty` suffix); the counts serve diagnostic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalChanges {
    /// No uncommitted changes.
    Clean,
    /// Uncommitted changes to tracked files.
    Uncommitted {
        /// Number of staged changes
        staged: usize,
        /// Number of unstaged changes
        unstaged: usize,
    },
}

impl LocalChanges {
    /// Check whether the working tree has no uncommitted changes.
    pub fn is_clean(&self) -> bool {
        matches!(self, LocalChanges::Clean)
    }
}

impl std::fmt::Display for LocalChanges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalChanges::Clean => write!(f, "clean"),
            LocalChanges::Uncommitted { staged, unstaged } => {
                write!(f, "{staged} staged, {unstaged} unstaged")
            }
        }
    }
}

/// The git data source.
///
/// One engine instance owns one source handle for its lifetime; the
/// underlying repository is assumed not to change while the handle lives.
#[async_trait]
pub trait GitSource: Send + Sync {
    /// List commits reachable from a revision expression, most-recent-first.
    ///
    /// Supports plain revisions (`"HEAD"`, a branch, a sha), two-dot ranges
    /// (`"A..B"`: reachable from B but not A) and three-dot ranges
    /// (`"A...B"`: reachable from either side but not their merge base).
    /// With `first_parent`, history is simplified to first parents only.
    ///
    /// An empty repository yields an empty list. An unresolvable expression
    /// is [`GitError::RevisionNotFound`].
    async fn rev_list(&self, rev: &str, first_parent: bool) -> Result<Vec<Commit>, GitError>;

    /// Resolve a revision expression to its full object id.
    ///
    /// Returns `None` when the expression does not resolve to a commit.
    async fn sha1(&self, rev: &str) -> Result<Option<Oid>, GitError>;

    /// The branch HEAD points at, or `None` when detached.
    ///
    /// For an unborn HEAD (fresh repository) the symbolic target is still
    /// reported.
    async fn head_branch_name(&self) -> Result<Option<String>, GitError>;

    /// Dirty-state of the working tree.
    async fn local_changes(&self) -> Result<LocalChanges, GitError>;

    /// Candidate refs for a branch, local first, then remote-tracking
    /// (origin preferred). Only refs that exist are returned; the first
    /// element is the resolved reference.
    async fn branch_local_or_remote(&self, branch: &str) -> Result<Vec<RefName>, GitError>;
}
