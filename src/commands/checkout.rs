//! `gvt checkout` command.

use std::path::Path;

use super::args;
use crate::context::ServiceContext;
use crate::error::{GvtError, Operation, Result};
use crate::repo::Repository;

/// Execute the `checkout` command.
///
/// Exactly one operand, the version id, is accepted.
///
/// # Errors
///
/// Returns [`GvtError::InvalidVersion`] for a missing, extra, malformed, or
/// out-of-range id, and an I/O error if the working directory cannot be
/// reconciled.
pub fn run(ctx: &ServiceContext, root: &Path, params: &[String]) -> Result<String> {
    let repo = Repository::open(ctx, root, Operation::Checkout)?;
    let [input] = params else {
        let input = params.first().cloned().unwrap_or_default();
        return Err(GvtError::InvalidVersion { input });
    };
    let id = args::parse_version(input)?;
    repo.checkout(id)?;
    Ok(format!("Checkout successful for version: {id}"))
}
