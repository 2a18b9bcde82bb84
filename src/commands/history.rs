//! `gvt history` command.

use std::path::Path;

use super::args;
use crate::context::ServiceContext;
use crate::error::{Operation, Result};
use crate::repo::Repository;

/// Execute the `history` command.
///
/// Prints `<id>: <message>` lines newest first, limited by `-last <n>`.
///
/// # Errors
///
/// Returns an error if the repository is missing or a message cannot be read.
pub fn run(ctx: &ServiceContext, root: &Path, params: &[String]) -> Result<String> {
    let repo = Repository::open(ctx, root, Operation::History)?;
    let lines = repo
        .history(args::history_limit(params))?
        .map(|entry| entry.map(|e| e.to_string()))
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}
