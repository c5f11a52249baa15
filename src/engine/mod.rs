//! engine
//!
//! The versioning engine and its caching layer.
//!
//! # Architecture
//!
//! [`Versioner`] is the engine interface: twelve asynchronous read-only
//! accessors from `head_branch_name` down to `version_name`.
//! [`VersionEngine`] implements it against a [`crate::git::GitSource`];
//! [`CachedVersioner`] is a decorator that memoizes every accessor via the
//! generic [`Memo`] utility so repeated queries against one instance are
//! answered from the cache.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use revline::core::config::VersionConfig;
//! use revline::engine::{CachedVersioner, VersionEngine, Versioner};
//! use revline::git::Git;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = VersionConfig::default();
//! let git = Git::open(std::path::Path::new("."))?;
//! let versioner = CachedVersioner::new(VersionEngine::new(config, Arc::new(git)));
//!
//! println!("Revision: {}", versioner.revision().await?);
//! println!("Version name: {}", versioner.version_name().await?);
//! # Ok(())
//! # }
//! ```

mod cached;
mod memo;
mod versioner;

pub use cached::CachedVersioner;
pub use memo::Memo;
pub use versioner::{time_component, VersionEngine, Versioner};
