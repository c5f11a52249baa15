//! engine::cached
//!
//! Caching decorator for [`Versioner`].
//!
//! # Design
//!
//! `CachedVersioner` wraps any engine and routes every accessor through a
//! per-key [`Memo`] cell: the first caller starts the delegate computation,
//! concurrent callers attach to the pending result, and later callers get
//! the completed value. The wrapper is transparent; callers cannot tell a
//! cached result from a fresh one except by timing.
//!
//! Results and failures are both retained for the instance's lifetime.
//! This is correct only because the wrapped repository state is assumed
//! immutable while the instance lives, which holds for one CLI invocation.

use async_trait::async_trait;

use super::memo::Memo;
use super::versioner::Versioner;
use crate::core::config::VersionConfig;
use crate::core::types::{Commit, Oid};
use crate::git::{GitError, LocalChanges};

/// A [`Versioner`] that computes each accessor at most once.
pub struct CachedVersioner<V> {
    inner: V,
    branches: Memo<Result<Option<String>, GitError>>,
    hashes: Memo<Result<Option<Oid>, GitError>>,
    changes: Memo<Result<LocalChanges, GitError>>,
    lists: Memo<Result<Vec<Commit>, GitError>>,
    origins: Memo<Result<Option<Commit>, GitError>>,
    numbers: Memo<Result<i64, GitError>>,
    names: Memo<Result<String, GitError>>,
}

impl<V> CachedVersioner<V> {
    /// Wrap an engine.
    pub fn new(inner: V) -> Self {
        Self {
            inner,
            branches: Memo::new(),
            hashes: Memo::new(),
            changes: Memo::new(),
            lists: Memo::new(),
            origins: Memo::new(),
            numbers: Memo::new(),
            names: Memo::new(),
        }
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for CachedVersioner<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedVersioner")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<V: Versioner> Versioner for CachedVersioner<V> {
    fn config(&self) -> &VersionConfig {
        self.inner.config()
    }

    async fn head_branch_name(&self) -> Result<Option<String>, GitError> {
        self.branches
            .cache("head_branch_name", || self.inner.head_branch_name())
            .await
    }

    async fn sha1(&self) -> Result<Option<Oid>, GitError> {
        self.hashes.cache("sha1", || self.inner.sha1()).await
    }

    async fn local_changes(&self) -> Result<LocalChanges, GitError> {
        self.changes
            .cache("local_changes", || self.inner.local_changes())
            .await
    }

    async fn commits(&self) -> Result<Vec<Commit>, GitError> {
        self.lists.cache("commits", || self.inner.commits()).await
    }

    async fn base_branch_first_parent_commits(&self) -> Result<Vec<Commit>, GitError> {
        self.lists
            .cache("base_branch_first_parent_commits", || {
                self.inner.base_branch_first_parent_commits()
            })
            .await
    }

    async fn feature_branch_origin(&self) -> Result<Option<Commit>, GitError> {
        self.origins
            .cache("feature_branch_origin", || {
                self.inner.feature_branch_origin()
            })
            .await
    }

    async fn base_branch_commits(&self) -> Result<Vec<Commit>, GitError> {
        self.lists
            .cache("base_branch_commits", || self.inner.base_branch_commits())
            .await
    }

    async fn feature_branch_commits(&self) -> Result<Vec<Commit>, GitError> {
        self.lists
            .cache("feature_branch_commits", || {
                self.inner.feature_branch_commits()
            })
            .await
    }

    async fn base_branch_time_component(&self) -> Result<i64, GitError> {
        self.numbers
            .cache("base_branch_time_component", || {
                self.inner.base_branch_time_component()
            })
            .await
    }

    async fn feature_branch_time_component(&self) -> Result<i64, GitError> {
        self.numbers
            .cache("feature_branch_time_component", || {
                self.inner.feature_branch_time_component()
            })
            .await
    }

    async fn revision(&self) -> Result<i64, GitError> {
        self.numbers.cache("revision", || self.inner.revision()).await
    }

    async fn version_name(&self) -> Result<String, GitError> {
        self.names
            .cache("version_name", || self.inner.version_name())
            .await
    }
}
