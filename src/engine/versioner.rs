//! engine::versioner
//!
//! The versioning engine: derives a revision number and a version name from
//! repository history.
//!
//! # Model
//!
//! Feature work is measured against a long-lived base branch. The engine
//! locates where the versioned revision's history rejoins the base branch's
//! first-parent lineage (the origin), counts commits on the base branch up
//! to and including that point, and folds gap-debounced working time into
//! the count so the revision number keeps increasing across quiet periods.
//!
//! # Failure semantics
//!
//! A missing base branch degrades to an empty history; a missing target
//! revision is an error. This asymmetry is deliberate: the engine works on
//! fresh repositories and repositories without the configured base branch,
//! but versioning a revision that does not exist is a usage error.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::config::VersionConfig;
use crate::core::types::{Commit, Oid};
use crate::git::{GitError, GitSource, LocalChanges};

/// Seconds in the 365-day year the time-component formula is scaled by.
const SECONDS_PER_YEAR: i64 = 365 * 24 * 60 * 60;

/// Short-hash length used in version names.
const SHORT_HASH_LEN: usize = 7;

/// Placeholder hash for unresolvable revisions.
const NULL_SHORT_HASH: &str = "0000000";

/// The versioning engine's read-only accessors.
///
/// Every accessor may perform git I/O and is side-effect-free on the
/// repository. Implementations are queried through shared references, so a
/// caller may request several accessors concurrently.
#[async_trait]
pub trait Versioner: Send + Sync {
    /// The configuration this engine was constructed with.
    fn config(&self) -> &VersionConfig;

    /// Current branch name, or `None` when HEAD is detached.
    async fn head_branch_name(&self) -> Result<Option<String>, GitError>;

    /// Full hash resolution of the configured revision, or `None` when
    /// unresolvable.
    async fn sha1(&self) -> Result<Option<Oid>, GitError>;

    /// Dirty-state of the working tree.
    async fn local_changes(&self) -> Result<LocalChanges, GitError>;

    /// Full ordered history reachable from the configured revision,
    /// most-recent-first.
    async fn commits(&self) -> Result<Vec<Commit>, GitError>;

    /// First-parent-only history of the base branch, resolved local-or-
    /// remote. Degrades to an empty list when the base branch is absent.
    async fn base_branch_first_parent_commits(&self) -> Result<Vec<Commit>, GitError>;

    /// The most recent commit shared between [`Versioner::commits`] and the
    /// base branch's first-parent lineage, or `None` for unrelated
    /// histories.
    async fn feature_branch_origin(&self) -> Result<Option<Commit>, GitError>;

    /// Full history reachable from the origin commit; empty when there is
    /// no origin. The revision number is based on this list.
    async fn base_branch_commits(&self) -> Result<Vec<Commit>, GitError>;

    /// Commits unique to the configured revision since it diverged from the
    /// base branch; the entire history when the histories are unrelated.
    async fn feature_branch_commits(&self) -> Result<Vec<Commit>, GitError>;

    /// Time component over [`Versioner::base_branch_commits`].
    async fn base_branch_time_component(&self) -> Result<i64, GitError>;

    /// Time component over [`Versioner::feature_branch_commits`].
    async fn feature_branch_time_component(&self) -> Result<i64, GitError>;

    /// The revision number: base branch commit count plus its time
    /// component.
    async fn revision(&self) -> Result<i64, GitError>;

    /// The descriptive version string.
    async fn version_name(&self) -> Result<String, GitError>;
}

/// Integer time component of an ordered (most-recent-first) commit list.
///
/// Elapsed time between the oldest and newest commit is reduced by every
/// gap of at least `stop_debounce` hours between adjacent commits (idle
/// nights, weekends, vacations), then scaled so that one year of continuous
/// work equals `year_factor` units. Rounding is half-up.
///
/// # Example
///
/// ```
/// use revline::engine::time_component;
///
/// // No commits, no time.
/// assert_eq!(time_component(&[], 1000, 48), 0);
/// ```
pub fn time_component(commits: &[Commit], year_factor: u32, stop_debounce: u32) -> i64 {
    let (Some(newest), Some(oldest)) = (commits.first(), commits.last()) else {
        return 0;
    };

    let complete = (newest.date - oldest.date).abs();
    if complete.is_zero() {
        return 0;
    }

    let debounce = chrono::Duration::hours(i64::from(stop_debounce));
    let mut gaps = chrono::Duration::zero();
    for pair in commits.windows(2) {
        let diff = (pair[0].date - pair[1].date).abs();
        // Boundary is inclusive: a gap of exactly the debounce is excluded
        if diff >= debounce {
            gaps = gaps + diff;
        }
    }

    let working = complete - gaps;
    let scaled =
        working.num_seconds() as f64 * f64::from(year_factor) / SECONDS_PER_YEAR as f64;
    (scaled + 0.5).floor() as i64
}

/// Git-backed implementation of [`Versioner`].
///
/// Stateless beyond its configuration and data-source handle; every
/// accessor recomputes. Wrap it in
/// [`CachedVersioner`](crate::engine::CachedVersioner) so repeated queries
/// against the same instance are answered from the cache.
pub struct VersionEngine {
    config: VersionConfig,
    source: Arc<dyn GitSource>,
}

impl VersionEngine {
    /// Create an engine over a data source.
    pub fn new(config: VersionConfig, source: Arc<dyn GitSource>) -> Self {
        Self { config, source }
    }
}

impl std::fmt::Debug for VersionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Versioner for VersionEngine {
    fn config(&self) -> &VersionConfig {
        &self.config
    }

    async fn head_branch_name(&self) -> Result<Option<String>, GitError> {
        self.source.head_branch_name().await
    }

    async fn sha1(&self) -> Result<Option<Oid>, GitError> {
        self.source.sha1(&self.config.rev).await
    }

    async fn local_changes(&self) -> Result<LocalChanges, GitError> {
        self.source.local_changes().await
    }

    async fn commits(&self) -> Result<Vec<Commit>, GitError> {
        self.source.rev_list(&self.config.rev, false).await
    }

    async fn base_branch_first_parent_commits(&self) -> Result<Vec<Commit>, GitError> {
        // A repository without the configured base branch is not an error;
        // divergence detection tolerates an empty lineage.
        let candidates = match self
            .source
            .branch_local_or_remote(&self.config.base_branch)
            .await
        {
            Ok(candidates) => candidates,
            Err(_) => return Ok(Vec::new()),
        };

        let Some(base_ref) = candidates.into_iter().next() else {
            return Ok(Vec::new());
        };

        match self.source.rev_list(base_ref.as_str(), true).await {
            Ok(commits) => Ok(commits),
            Err(_) => Ok(Vec::new()),
        }
    }

    async fn feature_branch_origin(&self) -> Result<Option<Commit>, GitError> {
        let commits = self.commits().await?;
        let base = self.base_branch_first_parent_commits().await?;
        let lineage: HashSet<&Oid> = base.iter().map(|commit| &commit.hash).collect();

        Ok(commits
            .into_iter()
            .find(|commit| lineage.contains(&commit.hash)))
    }

    async fn base_branch_commits(&self) -> Result<Vec<Commit>, GitError> {
        match self.feature_branch_origin().await? {
            Some(origin) => self.source.rev_list(origin.hash.as_str(), false).await,
            None => Ok(Vec::new()),
        }
    }

    async fn feature_branch_commits(&self) -> Result<Vec<Commit>, GitError> {
        match self.feature_branch_origin().await? {
            Some(origin) => {
                let range = format!("{}..{}", origin.hash, self.config.rev);
                self.source.rev_list(&range, false).await
            }
            // Unrelated histories: everything is feature work
            None => self.commits().await,
        }
    }

    async fn base_branch_time_component(&self) -> Result<i64, GitError> {
        let commits = self.base_branch_commits().await?;
        Ok(time_component(
            &commits,
            self.config.year_factor,
            self.config.stop_debounce,
        ))
    }

    async fn feature_branch_time_component(&self) -> Result<i64, GitError> {
        let commits = self.feature_branch_commits().await?;
        Ok(time_component(
            &commits,
            self.config.year_factor,
            self.config.stop_debounce,
        ))
    }

    async fn revision(&self) -> Result<i64, GitError> {
        let commits = self.base_branch_commits().await?;
        let time = self.base_branch_time_component().await?;
        Ok(commits.len() as i64 + time)
    }

    async fn version_name(&self) -> Result<String, GitError> {
        let revision = self.revision().await?;
        let hash = match self.sha1().await? {
            Some(oid) => oid.short(SHORT_HASH_LEN).to_string(),
            None => NULL_SHORT_HASH.to_string(),
        };
        let additional = self.feature_branch_commits().await?;
        let further_part = if additional.is_empty() {
            String::new()
        } else {
            format!("+{}", additional.len())
        };

        if self.config.rev == "HEAD" {
            let branch = self.head_branch_name().await?;
            let changes = self.local_changes().await?;

            let mut name_part = String::new();
            if let Some(branch) = &branch {
                if branch != &self.config.base_branch {
                    name_part = format!("_{branch}");
                }
            }
            if let Some(name) = &self.config.name {
                if name != &self.config.base_branch {
                    name_part = format!("_{name}");
                }
            }

            let dirty_part = if changes.is_clean() { "" } else { "-dirty" };
            Ok(format!(
                "{revision}{name_part}{further_part}_{hash}{dirty_part}"
            ))
        } else {
            let mut name_part = String::new();
            if !hash.starts_with(&self.config.rev) && self.config.rev != self.config.base_branch {
                name_part = format!("_{}", self.config.rev);
            }
            if let Some(name) = &self.config.name {
                if name != &self.config.base_branch {
                    name_part = format!("_{name}");
                }
            }

            // Explicit revisions never carry a dirty suffix
            Ok(format!("{revision}{name_part}{further_part}_{hash}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RefName;
    use crate::git::mock::{fake_commit, FailOn, MockSource};

    fn engine(config: VersionConfig, source: MockSource) -> VersionEngine {
        VersionEngine::new(config, Arc::new(source))
    }

    fn head_config() -> VersionConfig {
        VersionConfig::default()
    }

    mod time_component_fn {
        use super::*;

        #[test]
        fn empty_list_is_zero() {
            assert_eq!(time_component(&[], 1000, 48), 0);
        }

        #[test]
        fn single_commit_is_zero() {
            let commits = vec![fake_commit(1, "2024-03-01T12:00:00Z")];
            assert_eq!(time_component(&commits, 1000, 48), 0);
        }

        #[test]
        fn identical_dates_are_zero() {
            let commits = vec![
                fake_commit(1, "2024-03-01T12:00:00Z"),
                fake_commit(2, "2024-03-01T12:00:00Z"),
            ];
            assert_eq!(time_component(&commits, 1000, 48), 0);
        }

        #[test]
        fn rounds_half_up() {
            // 47304 seconds of working time is exactly 1.5 units at
            // year_factor 1000, which rounds up to 2.
            let commits = vec![
                fake_commit(1, "2024-03-02T01:08:24Z"),
                fake_commit(2, "2024-03-01T12:00:00Z"),
            ];
            assert_eq!(time_component(&commits, 1000, 48), 2);
        }

        #[test]
        fn gap_exactly_at_debounce_is_excluded() {
            let commits = vec![
                fake_commit(1, "2024-03-03T12:00:00Z"),
                fake_commit(2, "2024-03-01T12:00:00Z"),
            ];
            // The only gap is exactly 48h, so all elapsed time is idle
            assert_eq!(time_component(&commits, 1000, 48), 0);
        }

        #[test]
        fn gap_below_debounce_is_counted() {
            let commits = vec![
                fake_commit(1, "2024-03-03T11:00:00Z"),
                fake_commit(2, "2024-03-01T12:00:00Z"),
            ];
            // 47h of working time: 47 * 3600 * 1000 / 31536000 = 5.36 -> 5
            assert_eq!(time_component(&commits, 1000, 48), 5);
        }

        #[test]
        fn idle_gaps_are_removed_from_working_time() {
            let commits = vec![
                fake_commit(1, "2024-03-05T16:00:00Z"),
                fake_commit(2, "2024-03-05T06:00:00Z"),
                fake_commit(3, "2024-03-01T02:00:00Z"),
            ];
            // complete = 110h, the 100h gap is idle, 10h remain:
            // 10 * 3600 * 1000 / 31536000 = 1.14 -> 1
            assert_eq!(time_component(&commits, 1000, 48), 1);
        }

        #[test]
        fn infinite_debounce_collapses_to_elapsed_time() {
            let commits = vec![
                fake_commit(1, "2025-03-01T12:00:00Z"),
                fake_commit(2, "2024-09-01T12:00:00Z"),
                fake_commit(3, "2024-03-02T12:00:00Z"),
            ];
            // With an unreachable debounce no gap is excluded; 364 days of
            // elapsed time is 364/365 * 1000 = 997.26 -> 997
            assert_eq!(time_component(&commits, 1000, u32::MAX), 997);
        }

        #[test]
        fn zero_year_factor_is_zero() {
            let commits = vec![
                fake_commit(1, "2025-03-01T12:00:00Z"),
                fake_commit(2, "2024-03-01T12:00:00Z"),
            ];
            assert_eq!(time_component(&commits, 0, u32::MAX), 0);
        }
    }

    mod divergence {
        use super::*;

        #[tokio::test]
        async fn origin_is_most_recent_shared_commit() {
            let shared_old = fake_commit(1, "2024-01-01T00:00:00Z");
            let shared_new = fake_commit(2, "2024-01-02T00:00:00Z");
            let feature = fake_commit(3, "2024-01-03T00:00:00Z");

            let source = MockSource::new()
                .with_rev_list(
                    "HEAD",
                    vec![feature, shared_new.clone(), shared_old.clone()],
                )
                .with_branch_refs("master", vec![RefName::for_branch("master")])
                .with_first_parent_list(
                    "refs/heads/master",
                    vec![shared_new.clone(), shared_old],
                );

            let engine = engine(head_config(), source);
            let origin = engine.feature_branch_origin().await.unwrap();
            assert_eq!(origin, Some(shared_new));
        }

        #[tokio::test]
        async fn origin_absent_for_unrelated_histories() {
            let source = MockSource::new()
                .with_rev_list("HEAD", vec![fake_commit(3, "2024-01-03T00:00:00Z")])
                .with_branch_refs("master", vec![RefName::for_branch("master")])
                .with_first_parent_list(
                    "refs/heads/master",
                    vec![fake_commit(9, "2024-01-01T00:00:00Z")],
                );

            let engine = engine(head_config(), source);
            assert_eq!(engine.feature_branch_origin().await.unwrap(), None);
        }

        #[tokio::test]
        async fn origin_absent_when_base_branch_missing() {
            let source =
                MockSource::new().with_rev_list("HEAD", vec![fake_commit(1, "2024-01-01T00:00:00Z")]);

            let engine = engine(head_config(), source);
            assert_eq!(
                engine.base_branch_first_parent_commits().await.unwrap(),
                vec![]
            );
            assert_eq!(engine.feature_branch_origin().await.unwrap(), None);
        }

        #[tokio::test]
        async fn base_lineage_swallows_lookup_errors() {
            let source = MockSource::new().with_fail_on(FailOn::BranchLocalOrRemote(
                GitError::Internal {
                    message: "boom".to_string(),
                },
            ));

            let engine = engine(head_config(), source);
            assert_eq!(
                engine.base_branch_first_parent_commits().await.unwrap(),
                vec![]
            );
        }

        #[tokio::test]
        async fn missing_target_revision_is_an_error() {
            let source = MockSource::new();
            let engine = engine(head_config(), source);
            assert!(matches!(
                engine.commits().await,
                Err(GitError::RevisionNotFound { .. })
            ));
        }

        #[tokio::test]
        async fn base_commits_empty_without_origin() {
            let source = MockSource::new()
                .with_rev_list("HEAD", vec![fake_commit(1, "2024-01-01T00:00:00Z")]);

            let engine = engine(head_config(), source);
            assert_eq!(engine.base_branch_commits().await.unwrap(), vec![]);
        }

        #[tokio::test]
        async fn feature_commits_fall_back_to_full_history_without_origin() {
            let only = fake_commit(1, "2024-01-01T00:00:00Z");
            let source = MockSource::new().with_rev_list("HEAD", vec![only.clone()]);

            let engine = engine(head_config(), source);
            assert_eq!(engine.feature_branch_commits().await.unwrap(), vec![only]);
        }
    }

    mod revision_number {
        use super::*;

        #[tokio::test]
        async fn counts_base_commits_plus_time() {
            let base = vec![
                fake_commit(2, "2024-03-03T11:00:00Z"),
                fake_commit(1, "2024-03-01T12:00:00Z"),
            ];
            let origin_hash = base[0].hash.to_string();

            let source = MockSource::new()
                .with_rev_list("HEAD", base.clone())
                .with_branch_refs("master", vec![RefName::for_branch("master")])
                .with_first_parent_list("refs/heads/master", base.clone())
                .with_rev_list(origin_hash, base);

            let engine = engine(head_config(), source);
            // 2 commits + 5 time units over 47h of working time
            assert_eq!(engine.revision().await.unwrap(), 7);
        }

        #[tokio::test]
        async fn empty_repository_is_revision_zero() {
            let source = MockSource::new()
                .with_rev_list("HEAD", vec![])
                .with_branch_refs("master", vec![RefName::for_branch("master")])
                .with_first_parent_list("refs/heads/master", vec![]);

            let engine = engine(head_config(), source);
            assert_eq!(engine.revision().await.unwrap(), 0);
        }
    }

    mod version_name {
        use super::*;

        /// Mock repository for the feature-branch scenario: five commits on
        /// master, two more on feature-x, dirty working tree.
        fn feature_branch_source(changes: LocalChanges) -> (MockSource, String) {
            let master: Vec<Commit> = (1..=5)
                .map(|i| fake_commit(i, &format!("2024-03-01T1{}:00:00Z", 6 - i)))
                .collect();
            let tip = master[0].clone();
            let feature = vec![
                fake_commit(7, "2024-03-01T17:00:00Z"),
                fake_commit(6, "2024-03-01T16:00:00Z"),
            ];
            let head_sha = Oid::new("aa".repeat(20)).unwrap();

            let mut all = feature.clone();
            all.extend(master.clone());

            let source = MockSource::new()
                .with_rev_list("HEAD", all)
                .with_branch_refs("master", vec![RefName::for_branch("master")])
                .with_first_parent_list("refs/heads/master", master.clone())
                .with_rev_list(tip.hash.to_string(), master)
                .with_rev_list(format!("{}..HEAD", tip.hash), feature)
                .with_sha1("HEAD", head_sha.clone())
                .with_head_branch("feature-x")
                .with_local_changes(changes);

            (source, head_sha.short(7).to_string())
        }

        #[tokio::test]
        async fn feature_branch_with_dirty_tree() {
            let (source, short) = feature_branch_source(LocalChanges::Uncommitted {
                staged: 1,
                unstaged: 2,
            });
            let engine = engine(head_config(), source);

            assert_eq!(
                engine.version_name().await.unwrap(),
                format!("5_feature-x+2_{short}-dirty")
            );
        }

        #[tokio::test]
        async fn clean_tree_has_no_dirty_suffix() {
            let (source, short) = feature_branch_source(LocalChanges::Clean);
            let engine = engine(head_config(), source);

            assert_eq!(
                engine.version_name().await.unwrap(),
                format!("5_feature-x+2_{short}")
            );
        }

        #[tokio::test]
        async fn name_override_replaces_branch_segment() {
            let (source, short) = feature_branch_source(LocalChanges::Clean);
            let mut config = head_config();
            config.name = Some("nightly".to_string());
            let engine = engine(config, source);

            assert_eq!(
                engine.version_name().await.unwrap(),
                format!("5_nightly+2_{short}")
            );
        }

        #[tokio::test]
        async fn branch_equal_to_base_has_no_name_segment() {
            let master: Vec<Commit> = (1..=3)
                .map(|i| fake_commit(i, "2024-03-01T12:00:00Z"))
                .collect();
            let tip = master[0].clone();
            let head_sha = Oid::new("bb".repeat(20)).unwrap();

            let source = MockSource::new()
                .with_rev_list("HEAD", master.clone())
                .with_branch_refs("master", vec![RefName::for_branch("master")])
                .with_first_parent_list("refs/heads/master", master.clone())
                .with_rev_list(tip.hash.to_string(), master)
                .with_rev_list(format!("{}..HEAD", tip.hash), vec![])
                .with_sha1("HEAD", head_sha.clone())
                .with_head_branch("master");

            let engine = engine(head_config(), source);
            assert_eq!(
                engine.version_name().await.unwrap(),
                format!("3_{}", head_sha.short(7))
            );
        }

        #[tokio::test]
        async fn detached_head_has_no_name_segment() {
            let master: Vec<Commit> = vec![fake_commit(1, "2024-03-01T12:00:00Z")];
            let tip = master[0].clone();
            let head_sha = Oid::new("cc".repeat(20)).unwrap();

            let source = MockSource::new()
                .with_rev_list("HEAD", master.clone())
                .with_branch_refs("master", vec![RefName::for_branch("master")])
                .with_first_parent_list("refs/heads/master", master.clone())
                .with_rev_list(tip.hash.to_string(), master)
                .with_rev_list(format!("{}..HEAD", tip.hash), vec![])
                .with_sha1("HEAD", head_sha.clone());

            let engine = engine(head_config(), source);
            assert_eq!(
                engine.version_name().await.unwrap(),
                format!("1_{}", head_sha.short(7))
            );
        }

        #[tokio::test]
        async fn empty_repository_version_name() {
            let source = MockSource::new()
                .with_rev_list("HEAD", vec![])
                .with_branch_refs("master", vec![RefName::for_branch("master")])
                .with_first_parent_list("refs/heads/master", vec![])
                .with_head_branch("master");

            let engine = engine(head_config(), source);
            assert_eq!(engine.version_name().await.unwrap(), "0_0000000");
        }

        #[tokio::test]
        async fn explicit_short_sha_matching_hash_has_no_name_segment() {
            let master: Vec<Commit> = (1..=4)
                .map(|i| fake_commit(i, "2024-03-01T12:00:00Z"))
                .collect();
            let tip = master[0].clone();
            let short = tip.hash.short(7).to_string();

            let source = MockSource::new()
                .with_rev_list(short.clone(), master.clone())
                .with_branch_refs("master", vec![RefName::for_branch("master")])
                .with_first_parent_list("refs/heads/master", master.clone())
                .with_rev_list(tip.hash.to_string(), master)
                .with_rev_list(format!("{}..{}", tip.hash, short), vec![])
                .with_sha1(short.clone(), tip.hash.clone());

            let mut config = head_config();
            config.rev = short.clone();
            let engine = engine(config, source);

            // No +n suffix, no dirty suffix, no name segment
            assert_eq!(engine.version_name().await.unwrap(), format!("4_{short}"));
        }

        #[tokio::test]
        async fn explicit_branch_rev_is_named() {
            let master: Vec<Commit> = vec![fake_commit(1, "2024-03-01T12:00:00Z")];
            let tip = master[0].clone();
            let feature = vec![fake_commit(2, "2024-03-01T13:00:00Z")];
            let feature_sha = Oid::new("dd".repeat(20)).unwrap();

            let mut all = feature.clone();
            all.extend(master.clone());

            let source = MockSource::new()
                .with_rev_list("feature-x", all)
                .with_branch_refs("master", vec![RefName::for_branch("master")])
                .with_first_parent_list("refs/heads/master", master.clone())
                .with_rev_list(tip.hash.to_string(), master)
                .with_rev_list(format!("{}..feature-x", tip.hash), feature)
                .with_sha1("feature-x", feature_sha.clone());

            let mut config = head_config();
            config.rev = "feature-x".to_string();
            let engine = engine(config, source);

            assert_eq!(
                engine.version_name().await.unwrap(),
                format!("1_feature-x+1_{}", feature_sha.short(7))
            );
        }

        #[tokio::test]
        async fn explicit_rev_never_gets_dirty_suffix() {
            let master: Vec<Commit> = vec![fake_commit(1, "2024-03-01T12:00:00Z")];
            let tip = master[0].clone();
            let short = tip.hash.short(7).to_string();

            let source = MockSource::new()
                .with_rev_list(short.clone(), master.clone())
                .with_branch_refs("master", vec![RefName::for_branch("master")])
                .with_first_parent_list("refs/heads/master", master.clone())
                .with_rev_list(tip.hash.to_string(), master)
                .with_rev_list(format!("{}..{}", tip.hash, short), vec![])
                .with_sha1(short.clone(), tip.hash.clone())
                .with_local_changes(LocalChanges::Uncommitted {
                    staged: 1,
                    unstaged: 0,
                });

            let mut config = head_config();
            config.rev = short.clone();
            let engine = engine(config, source);

            let name = engine.version_name().await.unwrap();
            assert!(!name.ends_with("-dirty"));
        }
    }
}
