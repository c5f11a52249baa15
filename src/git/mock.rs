//! git::mock
//!
//! Mock git data source for deterministic testing.
//!
//! # Design
//!
//! The mock source serves pre-configured commit lists and resolutions from
//! memory and records every call, so tests can assert both results and call
//! counts (the memoizer's at-most-once guarantee is verified this way).
//! Failure scenarios are injected per method.
//!
//! # Example
//!
//! ```
//! use revline::git::mock::{fake_commit, MockSource};
//! use revline::git::GitSource;
//!
//! # tokio_test::block_on(async {
//! let source = MockSource::new()
//!     .with_head_branch("master")
//!     .with_rev_list("HEAD", vec![fake_commit(1, "2024-03-01T12:00:00Z")]);
//!
//! let commits = source.rev_list("HEAD", false).await.unwrap();
//! assert_eq!(commits.len(), 1);
//! assert_eq!(source.call_count("rev_list"), 1);
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::source::{GitError, GitSource, LocalChanges};
use crate::core::types::{Commit, Oid, RefName};

/// Fabricate a commit with a stable hash derived from `id` and the given
/// RFC3339 date.
pub fn fake_commit(id: u8, date: &str) -> Commit {
    let hash = Oid::new(format!("{id:02x}").repeat(20)).expect("two hex chars repeated is valid");
    let date = DateTime::parse_from_rfc3339(date)
        .expect("valid RFC3339 date")
        .with_timezone(&Utc);
    Commit { hash, date }
}

/// Configuration for which method should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail rev_list with the given error.
    RevList(GitError),
    /// Fail sha1 with the given error.
    Sha1(GitError),
    /// Fail head_branch_name with the given error.
    HeadBranchName(GitError),
    /// Fail local_changes with the given error.
    LocalChanges(GitError),
    /// Fail branch_local_or_remote with the given error.
    BranchLocalOrRemote(GitError),
}

/// Recorded call for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    RevList { rev: String, first_parent: bool },
    Sha1 { rev: String },
    HeadBranchName,
    LocalChanges,
    BranchLocalOrRemote { branch: String },
}

impl MockCall {
    fn method(&self) -> &'static str {
        match self {
            MockCall::RevList { .. } => "rev_list",
            MockCall::Sha1 { .. } => "sha1",
            MockCall::HeadBranchName => "head_branch_name",
            MockCall::LocalChanges => "local_changes",
            MockCall::BranchLocalOrRemote { .. } => "branch_local_or_remote",
        }
    }
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockSourceInner {
    /// rev expression → commit list, for non-first-parent walks.
    rev_lists: HashMap<String, Vec<Commit>>,
    /// rev expression → commit list, for first-parent walks.
    first_parent_lists: HashMap<String, Vec<Commit>>,
    /// rev expression → full hash.
    shas: HashMap<String, Oid>,
    /// Current branch, None when detached.
    head_branch: Option<String>,
    /// Working tree state.
    changes: Option<LocalChanges>,
    /// branch name → existing candidate refs.
    branch_refs: HashMap<String, Vec<RefName>>,
    /// Method to fail on.
    fail_on: Option<FailOn>,
    /// Recorded calls.
    calls: Vec<MockCall>,
}

/// Mock git data source.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    inner: Arc<Mutex<MockSourceInner>>,
}

impl MockSource {
    /// Create a new empty mock source.
    ///
    /// Unconfigured queries behave like an empty repository: no commits,
    /// no resolutions, clean working tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `commits` for non-first-parent walks of `rev`.
    pub fn with_rev_list(self, rev: impl Into<String>, commits: Vec<Commit>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .rev_lists
            .insert(rev.into(), commits);
        self
    }

    /// Serve `commits` for first-parent walks of `rev`.
    pub fn with_first_parent_list(self, rev: impl Into<String>, commits: Vec<Commit>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .first_parent_lists
            .insert(rev.into(), commits);
        self
    }

    /// Resolve `rev` to the given full hash.
    pub fn with_sha1(self, rev: impl Into<String>, oid: Oid) -> Self {
        self.inner.lock().unwrap().shas.insert(rev.into(), oid);
        self
    }

    /// Set the current branch.
    pub fn with_head_branch(self, branch: impl Into<String>) -> Self {
        self.inner.lock().unwrap().head_branch = Some(branch.into());
        self
    }

    /// Set the working tree state.
    pub fn with_local_changes(self, changes: LocalChanges) -> Self {
        self.inner.lock().unwrap().changes = Some(changes);
        self
    }

    /// Register existing candidate refs for a branch name.
    pub fn with_branch_refs(self, branch: impl Into<String>, refs: Vec<RefName>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .branch_refs
            .insert(branch.into(), refs);
        self
    }

    /// Configure one method to fail.
    pub fn with_fail_on(self, fail_on: FailOn) -> Self {
        self.inner.lock().unwrap().fail_on = Some(fail_on);
        self
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Number of recorded calls to a method (`"rev_list"`, `"sha1"`, ...).
    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| call.method() == method)
            .count()
    }
}

#[async_trait]
impl GitSource for MockSource {
    async fn rev_list(&self, rev: &str, first_parent: bool) -> Result<Vec<Commit>, GitError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(MockCall::RevList {
            rev: rev.to_string(),
            first_parent,
        });
        if let Some(FailOn::RevList(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        let table = if first_parent {
            &inner.first_parent_lists
        } else {
            &inner.rev_lists
        };
        table
            .get(rev)
            .cloned()
            .ok_or_else(|| GitError::RevisionNotFound {
                rev: rev.to_string(),
            })
    }

    async fn sha1(&self, rev: &str) -> Result<Option<Oid>, GitError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(MockCall::Sha1 {
            rev: rev.to_string(),
        });
        if let Some(FailOn::Sha1(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        Ok(inner.shas.get(rev).cloned())
    }

    async fn head_branch_name(&self) -> Result<Option<String>, GitError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(MockCall::HeadBranchName);
        if let Some(FailOn::HeadBranchName(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        Ok(inner.head_branch.clone())
    }

    async fn local_changes(&self) -> Result<LocalChanges, GitError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(MockCall::LocalChanges);
        if let Some(FailOn::LocalChanges(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        Ok(inner.changes.unwrap_or(LocalChanges::Clean))
    }

    async fn branch_local_or_remote(&self, branch: &str) -> Result<Vec<RefName>, GitError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(MockCall::BranchLocalOrRemote {
            branch: branch.to_string(),
        });
        if let Some(FailOn::BranchLocalOrRemote(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        Ok(inner.branch_refs.get(branch).cloned().unwrap_or_default())
    }
}
