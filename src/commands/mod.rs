//! Command dispatch and handlers.
//!
//! Each handler opens the repository for its own operation (which rejects
//! an uninitialized root), interprets its operands, and returns the text to
//! print on success.

pub mod args;
pub mod checkout;
pub mod history;
pub mod init;
pub mod mutate;
pub mod version;

use std::path::Path;

use crate::cli::Command;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::repo::MutationKind;

/// Dispatch a parsed command and its raw operands to the handler.
///
/// # Errors
///
/// Returns the handler's error unchanged.
pub fn dispatch(
    ctx: &ServiceContext,
    root: &Path,
    command: Command,
    params: &[String],
) -> Result<String> {
    tracing::debug!(?command, ?params, root = %root.display(), "dispatching");
    match command {
        Command::Init => init::run(ctx, root),
        Command::Add => mutate::run(ctx, root, MutationKind::Add, params),
        Command::Detach => mutate::run(ctx, root, MutationKind::Detach, params),
        Command::Commit => mutate::run(ctx, root, MutationKind::Commit, params),
        Command::Checkout => checkout::run(ctx, root, params),
        Command::History => history::run(ctx, root, params),
        Command::Version => version::run(ctx, root, params),
    }
}
