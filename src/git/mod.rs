//! git
//!
//! Single interface for all git operations.
//!
//! # Architecture
//!
//! This module is the **only doorway** to git. The versioning engine
//! consumes the [`GitSource`] trait; the [`Git`] type implements it with the
//! `git2` crate (no shelling out to the git CLI), and [`mock::MockSource`]
//! implements it in memory for tests. No other module imports `git2`.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - History walks (`rev-list` semantics, ranges, first-parent)
//! - Revision resolution to full hashes
//! - Current-branch and working-tree status queries
//! - Local-or-remote branch reference lookup
//!
//! All operations are read-only; nothing here mutates the repository.

mod interface;
pub mod mock;
mod source;

pub use interface::Git;
pub use source::{GitError, GitSource, LocalChanges};
