//! Snapshot directory store: the on-disk repository layout.
//!
//! Every version is a full copy of the tracked files, kept in its own
//! numbered directory under the metadata root. Two pointer files record the
//! newest version and the one mirrored into the working directory:
//!
//! ```text
//! <root>/
//!   └── .gvt/
//!         ├── 0/
//!         │   └── .gvt_commit_msg
//!         ├── 1/
//!         │   ├── .gvt_commit_msg
//!         │   └── notes.txt
//!         ├── .gvt_latest_ver
//!         └── .gvt_active_ver
//! ```
//!
//! Versions are append-only. A version directory is written completely,
//! message included, before `latest` moves to it, and `latest` always moves
//! before `active`.

mod builder;
mod checkout;
mod history;
mod inspect;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::context::ServiceContext;
use crate::error::{GvtError, Operation, Result};

pub use builder::{Mutation, MutationKind, MutationOutcome};
pub use history::{History, HistoryEntry};
pub use inspect::VersionRecord;

/// Name of the metadata directory inside the project root.
pub const METADATA_DIR: &str = ".gvt";
/// Commit message file stored in every version directory.
pub const MESSAGE_FILE: &str = ".gvt_commit_msg";
/// Pointer file holding the newest version id.
pub const LATEST_FILE: &str = ".gvt_latest_ver";
/// Pointer file holding the version mirrored into the working directory.
pub const ACTIVE_FILE: &str = ".gvt_active_ver";
/// Message recorded for version 0.
pub const INIT_MESSAGE: &str = "GVT initialized.";

/// A `gvt` repository rooted at a project directory.
///
/// All I/O goes through `ctx.fs` so the repository works with live,
/// recording, and replaying adapters.
///
/// There is no locking: a repository assumes a single writer. Two `gvt`
/// processes mutating the same root at once can both claim the same next
/// version id; callers must serialize invocations themselves.
pub struct Repository<'a> {
    ctx: &'a ServiceContext,
    root: PathBuf,
    meta: PathBuf,
    op: Operation,
}

impl<'a> Repository<'a> {
    fn at(ctx: &'a ServiceContext, root: &Path, op: Operation) -> Self {
        Self { ctx, root: root.to_path_buf(), meta: root.join(METADATA_DIR), op }
    }

    /// Returns `true` if `root` already holds a metadata directory.
    #[must_use]
    pub fn is_initialized(ctx: &ServiceContext, root: &Path) -> bool {
        ctx.fs.is_dir(&root.join(METADATA_DIR))
    }

    /// Opens an existing repository for the given command.
    ///
    /// # Errors
    ///
    /// Returns [`GvtError::NotInitialized`] if `root` has no metadata directory.
    pub fn open(ctx: &'a ServiceContext, root: &Path, op: Operation) -> Result<Self> {
        if !Self::is_initialized(ctx, root) {
            return Err(GvtError::NotInitialized);
        }
        Ok(Self::at(ctx, root, op))
    }

    /// Creates the metadata directory and version 0, with both pointers at 0.
    ///
    /// # Errors
    ///
    /// Returns [`GvtError::AlreadyInitialized`] if the metadata directory
    /// exists, or [`GvtError::Io`] if any part of the layout cannot be written.
    pub fn init(ctx: &'a ServiceContext, root: &Path) -> Result<Self> {
        if Self::is_initialized(ctx, root) {
            return Err(GvtError::AlreadyInitialized);
        }
        let repo = Self::at(ctx, root, Operation::Init);
        ctx.fs
            .create_dir(&repo.meta)
            .map_err(|e| repo.io_error(format!("create {}", repo.meta.display()), e))?;
        repo.create_version_dir(0)?;
        repo.write_message(0, INIT_MESSAGE)?;
        repo.write_pointer(LATEST_FILE, 0)?;
        repo.write_pointer(ACTIVE_FILE, 0)?;
        tracing::info!(root = %root.display(), "initialized repository");
        Ok(repo)
    }

    /// Project root holding the working files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads the id of the newest version.
    ///
    /// # Errors
    ///
    /// Returns [`GvtError::CorruptState`] if the pointer is not a non-negative
    /// integer, or [`GvtError::Io`] if it cannot be read.
    pub fn read_latest(&self) -> Result<u64> {
        self.read_pointer(LATEST_FILE)
    }

    /// Reads the id of the version mirrored into the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`GvtError::CorruptState`] if the pointer is not a non-negative
    /// integer, or [`GvtError::Io`] if it cannot be read.
    pub fn read_active(&self) -> Result<u64> {
        self.read_pointer(ACTIVE_FILE)
    }

    /// Replaces the active pointer.
    ///
    /// # Errors
    ///
    /// Returns [`GvtError::Io`] if the pointer cannot be written.
    pub fn write_active(&self, id: u64) -> Result<()> {
        self.write_pointer(ACTIVE_FILE, id)
    }

    /// Directory holding version `id`. Pure path mapping.
    #[must_use]
    pub fn version_path(&self, id: u64) -> PathBuf {
        self.meta.join(id.to_string())
    }

    /// Creates the empty directory for version `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GvtError::VersionAlreadyExists`] if the directory is already
    /// present, or [`GvtError::Io`] if it cannot be created.
    pub fn create_version_dir(&self, id: u64) -> Result<PathBuf> {
        let dir = self.version_path(id);
        if self.ctx.fs.exists(&dir) {
            return Err(GvtError::VersionAlreadyExists { id });
        }
        self.ctx
            .fs
            .create_dir(&dir)
            .map_err(|e| self.io_error(format!("create version directory {id}"), e))?;
        debug!(id, "created version directory");
        Ok(dir)
    }

    /// Ids of every version directory present, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`GvtError::Io`] if the metadata directory cannot be listed.
    pub fn version_ids(&self) -> Result<Vec<u64>> {
        let entries = self
            .ctx
            .fs
            .list_dir(&self.meta)
            .map_err(|e| self.io_error("list versions", e))?;
        let mut ids: Vec<u64> = entries.iter().filter_map(|name| name.parse().ok()).collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// Names of the tracked files stored in version `id`.
    ///
    /// Dot-prefixed entries are internal (the commit message) and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GvtError::Io`] if the version directory cannot be listed.
    pub fn snapshot_files(&self, id: u64) -> Result<Vec<String>> {
        let entries = self
            .ctx
            .fs
            .list_dir(&self.version_path(id))
            .map_err(|e| self.io_error(format!("list version {id}"), e))?;
        Ok(entries.into_iter().filter(|name| !name.starts_with('.')).collect())
    }

    /// Returns `true` if version `id` holds a copy of `file`.
    #[must_use]
    pub fn snapshot_contains(&self, id: u64, file: &str) -> bool {
        self.ctx.fs.exists(&self.version_path(id).join(file))
    }

    /// Reads the full commit message of version `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GvtError::Io`] if the message file cannot be read.
    pub fn read_message(&self, id: u64) -> Result<String> {
        self.ctx
            .fs
            .read_to_string(&self.version_path(id).join(MESSAGE_FILE))
            .map_err(|e| self.io_error(format!("read message of version {id}"), e))
    }

    /// Fails with [`GvtError::InvalidVersion`] unless `id <= latest`.
    ///
    /// # Errors
    ///
    /// Also returns any error from reading the latest pointer.
    pub fn ensure_exists(&self, id: u64) -> Result<()> {
        if id > self.read_latest()? {
            return Err(GvtError::InvalidVersion { input: id.to_string() });
        }
        Ok(())
    }

    fn write_message(&self, id: u64, message: &str) -> Result<()> {
        self.ctx
            .fs
            .write(&self.version_path(id).join(MESSAGE_FILE), message)
            .map_err(|e| self.io_error(format!("write message of version {id}"), e))
    }

    fn working_path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    fn pointer_path(&self, name: &str) -> PathBuf {
        self.meta.join(name)
    }

    fn read_pointer(&self, name: &str) -> Result<u64> {
        let path = self.pointer_path(name);
        let raw = self
            .ctx
            .fs
            .read_to_string(&path)
            .map_err(|e| self.io_error(format!("read {name}"), e))?;
        raw.trim().parse().map_err(|_| GvtError::CorruptState {
            path: path.display().to_string(),
            value: raw.clone(),
        })
    }

    /// Writes through a sibling temp file so readers never see a partial value.
    fn write_pointer(&self, name: &str, id: u64) -> Result<()> {
        let path = self.pointer_path(name);
        let tmp = self.pointer_path(&format!("{name}.tmp"));
        self.ctx
            .fs
            .write(&tmp, &id.to_string())
            .map_err(|e| self.io_error(format!("write {name}"), e))?;
        self.ctx.fs.rename(&tmp, &path).map_err(|e| self.io_error(format!("replace {name}"), e))?;
        debug!(pointer = name, id, "pointer updated");
        Ok(())
    }

    fn io_error(&self, context: impl Into<String>, source: crate::error::BoxError) -> GvtError {
        GvtError::io(self.op, context, source)
    }
}
