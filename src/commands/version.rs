//! `gvt version` command.

use std::path::Path;

use super::args;
use crate::context::ServiceContext;
use crate::error::{Operation, Result};
use crate::repo::Repository;

/// Execute the `version` command.
///
/// Shows the given version, or the active one when no id is passed.
/// Operands after the first are ignored.
///
/// # Errors
///
/// Returns [`crate::error::GvtError::InvalidVersion`] for a malformed or
/// out-of-range id.
pub fn run(ctx: &ServiceContext, root: &Path, params: &[String]) -> Result<String> {
    let repo = Repository::open(ctx, root, Operation::Version)?;
    let id = params.first().map(|input| args::parse_version(input)).transpose()?;
    Ok(repo.inspect(id)?.to_string())
}
