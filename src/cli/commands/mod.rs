//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each handler validates its arguments, queries the versioning engine, and
//! formats output. Handlers never mutate the repository.

mod completion;
mod show;

pub use completion::completion;
pub use show::show;

use anyhow::Result;

use crate::cli::args::{Cli, Command};
use crate::cli::Context;

/// Dispatch a parsed invocation to its handler.
pub async fn dispatch(cli: Cli, ctx: &Context) -> Result<()> {
    match cli.command {
        Some(Command::Completion { shell }) => completion(shell),
        None => show(&cli.show, ctx).await,
    }
}
