//! engine::memo
//!
//! Generic async memoization keyed by accessor name.
//!
//! # Contract
//!
//! For a given key, at most one computation is ever started; concurrent and
//! subsequent callers attach to the same pending cell and observe the same
//! eventual value. Entries are never invalidated, which is correct only
//! because the underlying repository is assumed immutable for the owning
//! instance's lifetime.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};

/// A key → pending-or-completed result map.
///
/// Results must be `Clone`; memoized failures are shared by storing a
/// cloneable `Result` as the cell value.
///
/// # Example
///
/// ```
/// use revline::engine::Memo;
///
/// # tokio_test::block_on(async {
/// let memo: Memo<u32> = Memo::new();
/// let first = memo.cache("answer", || async { 42 }).await;
/// // The second computation never runs; the cached value is returned.
/// let second = memo.cache("answer", || async { 7 }).await;
/// assert_eq!(first, 42);
/// assert_eq!(second, 42);
/// # });
/// ```
#[derive(Debug)]
pub struct Memo<T> {
    cells: Mutex<HashMap<&'static str, Arc<OnceCell<T>>>>,
}

impl<T: Clone> Memo<T> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Return the memoized value for `key`, computing it with `compute` if
    /// this is the first caller. Concurrent callers for the same key await
    /// the same in-flight computation.
    pub async fn cache<F, Fut>(&self, key: &'static str, compute: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let cell = {
            let mut cells = self.cells.lock().await;
            Arc::clone(cells.entry(key).or_default())
        };
        cell.get_or_init(compute).await.clone()
    }
}

impl<T: Clone> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}
