//! show command - Print the revision number and version name
//!
//! This is the default invocation: it resolves the configuration from CLI
//! flags and the optional `revline.toml`, constructs a cached versioning
//! engine over the repository, and prints the requested fields.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::args::{Format, ShowArgs};
use crate::cli::Context;
use crate::core::config::{FileConfig, VersionConfig};
use crate::core::types::Oid;
use crate::engine::{CachedVersioner, VersionEngine, Versioner};
use crate::git::Git;
use crate::ui::output;

/// Machine-readable result of a show invocation.
#[derive(Debug, Serialize)]
struct VersionInfo {
    revision: i64,
    version_name: String,
    sha1: Option<Oid>,
    branch: Option<String>,
    dirty: bool,
}

/// Run the default invocation.
pub async fn show(args: &ShowArgs, ctx: &Context) -> Result<()> {
    let cwd = match &ctx.cwd {
        Some(cwd) => cwd.clone(),
        None => std::env::current_dir().context("failed to determine current directory")?,
    };

    let git = Git::open(&cwd)?;
    let work_dir = git.work_dir()?;

    let file = FileConfig::load(&work_dir)?.unwrap_or_default();
    let config = VersionConfig::new(
        args.rev.clone(),
        args.base_branch
            .clone()
            .or(file.base_branch)
            .unwrap_or_else(|| VersionConfig::DEFAULT_BASE_BRANCH.to_string()),
        &cwd,
        args.year_factor
            .or(file.year_factor)
            .unwrap_or(VersionConfig::DEFAULT_YEAR_FACTOR),
        args.stop_debounce
            .or(file.stop_debounce)
            .unwrap_or(VersionConfig::DEFAULT_STOP_DEBOUNCE),
        args.name.clone().or(file.name),
    )?;
    output::debug(format!("resolved config: {config:?}"), ctx.verbosity);

    let versioner = CachedVersioner::new(VersionEngine::new(config, Arc::new(git)));

    if args.json {
        let info = VersionInfo {
            revision: versioner.revision().await?,
            version_name: versioner.version_name().await?,
            sha1: versioner.sha1().await?,
            branch: versioner.head_branch_name().await?,
            dirty: !versioner.local_changes().await?.is_clean(),
        };
        output::print(serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    match args.format {
        Format::Full => {
            output::print(format!(
                "Revision: {}\nVersion name: {}",
                versioner.revision().await?,
                versioner.version_name().await?
            ));
        }
        Format::Revision => output::print(versioner.revision().await?),
        Format::Name => output::print(versioner.version_name().await?),
    }

    Ok(())
}
