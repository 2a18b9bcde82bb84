//! `gvt init` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::error::Result;
use crate::repo::Repository;

/// Execute the `init` command.
///
/// # Errors
///
/// Returns an error if the root is already initialized or the layout
/// cannot be written.
pub fn run(ctx: &ServiceContext, root: &Path) -> Result<String> {
    Repository::init(ctx, root)?;
    Ok("Current directory initialized successfully.".to_string())
}
