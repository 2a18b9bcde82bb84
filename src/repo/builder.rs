//! Version builder: derives version N+1 from version N plus one mutation.

use std::fmt;

use tracing::{debug, info};

use super::Repository;
use crate::error::{GvtError, Operation, Result};

/// The change a new version applies to its predecessor's file set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Start tracking a working-tree file.
    Add,
    /// Stop tracking a file.
    Detach,
    /// Store the current working-tree content of a tracked file.
    Commit,
}

impl MutationKind {
    /// Command this mutation belongs to.
    #[must_use]
    pub fn operation(self) -> Operation {
        match self {
            Self::Add => Operation::Add,
            Self::Detach => Operation::Detach,
            Self::Commit => Operation::Commit,
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Self::Add => "added",
            Self::Detach => "detached",
            Self::Commit => "committed",
        }
    }

    fn reads_working_tree(self) -> bool {
        matches!(self, Self::Add | Self::Commit)
    }
}

/// One requested change to the tracked file set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// What to do.
    pub kind: MutationKind,
    /// Tracked file name, relative to the project root.
    pub file: String,
    /// Commit message overriding the default.
    pub message: Option<String>,
}

impl Mutation {
    /// Creates a mutation with the default commit message.
    pub fn new(kind: MutationKind, file: impl Into<String>) -> Self {
        Self { kind, file: file.into(), message: None }
    }

    /// Overrides the commit message.
    #[must_use]
    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    /// Confirmation text, also the commit message when none was supplied.
    #[must_use]
    pub fn default_message(&self) -> String {
        format!("File {} successfully. File: {}", self.kind.past_tense(), self.file)
    }
}

/// Result of applying a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// A new version was written and both pointers moved to it.
    Created {
        /// Id of the new version.
        id: u64,
    },
    /// The latest snapshot already satisfied the request; nothing was written.
    Unchanged,
}

impl fmt::Display for MutationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { id } => write!(f, "created version {id}"),
            Self::Unchanged => f.write_str("unchanged"),
        }
    }
}

impl Repository<'_> {
    /// Applies `mutation` on top of the latest version.
    ///
    /// Add is a no-op when the file is already in the latest snapshot;
    /// detach and commit are no-ops when it is not. Otherwise the latest
    /// snapshot is copied into a new version directory, the change is
    /// applied, the message is written, and `latest` then `active` advance.
    ///
    /// A failure part-way leaves any partially written version directory in
    /// place and the pointers untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GvtError::FileNotFound`] if add or commit names a file missing
    /// from the working tree, and [`GvtError::Io`] (tagged with the file) if
    /// any filesystem step fails.
    pub fn apply(&self, mutation: &Mutation) -> Result<MutationOutcome> {
        let op = mutation.kind.operation();
        let source = self.working_path(&mutation.file);
        if mutation.kind.reads_working_tree() && !self.ctx.fs.exists(&source) {
            return Err(GvtError::FileNotFound { op, file: mutation.file.clone() });
        }

        self.build(mutation).map_err(|e| e.during(op).for_file(&mutation.file))
    }

    fn build(&self, mutation: &Mutation) -> Result<MutationOutcome> {
        let latest = self.read_latest()?;
        let tracked = self.snapshot_contains(latest, &mutation.file);
        let applies = match mutation.kind {
            MutationKind::Add => !tracked,
            MutationKind::Detach | MutationKind::Commit => tracked,
        };
        if !applies {
            debug!(kind = ?mutation.kind, file = %mutation.file, latest, "mutation is a no-op");
            return Ok(MutationOutcome::Unchanged);
        }

        let id = latest + 1;
        let dir = self.create_version_dir(id)?;
        self.copy_snapshot(latest, id)?;

        let target = dir.join(&mutation.file);
        match mutation.kind {
            MutationKind::Add | MutationKind::Commit => {
                let source = self.working_path(&mutation.file);
                self.ctx
                    .fs
                    .copy_file(&source, &target)
                    .map_err(|e| self.io_error(format!("copy {} into version {id}", mutation.file), e))?;
            }
            MutationKind::Detach => {
                self.ctx
                    .fs
                    .remove_file(&target)
                    .map_err(|e| self.io_error(format!("drop {} from version {id}", mutation.file), e))?;
            }
        }

        let message = mutation.message.clone().unwrap_or_else(|| mutation.default_message());
        self.write_message(id, &message)?;
        self.write_pointer(super::LATEST_FILE, id)?;
        self.write_active(id)?;

        info!(id, kind = ?mutation.kind, file = %mutation.file, "created version");
        Ok(MutationOutcome::Created { id })
    }

    /// Copies the tracked files of version `from` into the directory of `to`.
    fn copy_snapshot(&self, from: u64, to: u64) -> Result<()> {
        let source_dir = self.version_path(from);
        let target_dir = self.version_path(to);
        for name in self.snapshot_files(from)? {
            self.ctx
                .fs
                .copy_file(&source_dir.join(&name), &target_dir.join(&name))
                .map_err(|e| self.io_error(format!("copy {name} from version {from}"), e))?;
        }
        Ok(())
    }
}
