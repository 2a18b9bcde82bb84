//! `gvt add`, `gvt detach`, and `gvt commit` commands.

use std::path::Path;

use super::args;
use crate::context::ServiceContext;
use crate::error::{GvtError, Result};
use crate::repo::{Mutation, MutationKind, MutationOutcome, Repository};

/// Execute one of the file-mutating commands.
///
/// Reports success both when a version was created and when the latest
/// version already matched the request.
///
/// # Errors
///
/// Returns an error if the repository is missing, no file was named, the
/// working file is missing (add, commit), or the new version cannot be
/// written.
pub fn run(
    ctx: &ServiceContext,
    root: &Path,
    kind: MutationKind,
    params: &[String],
) -> Result<String> {
    let op = kind.operation();
    let repo = Repository::open(ctx, root, op)?;
    let file = args::target_file(params).ok_or(GvtError::MissingArgument { op })?;
    let mutation = Mutation::new(kind, file).with_message(args::user_message(params));

    let outcome = repo.apply(&mutation)?;
    Ok(match outcome {
        MutationOutcome::Created { .. } => mutation.default_message(),
        MutationOutcome::Unchanged => unchanged_message(kind, file),
    })
}

fn unchanged_message(kind: MutationKind, file: &str) -> String {
    match kind {
        MutationKind::Add => format!("File already added. File: {file}"),
        MutationKind::Detach | MutationKind::Commit => {
            format!("File is not added to gvt. File: {file}")
        }
    }
}
