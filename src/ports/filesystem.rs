//! Filesystem port for repository and working-tree I/O.

use std::path::Path;

use crate::error::BoxError;

/// Provides the filesystem primitives the repository engine is built on.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk. Tracked files are copied as raw bytes;
/// only pointer and message files are read and written as text.
pub trait FileSystem: Send + Sync {
    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Creates a single directory. The parent must already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    fn create_dir(&self, path: &Path) -> Result<(), BoxError>;

    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, BoxError>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), BoxError>;

    /// Renames `from` to `to`, replacing `to` if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` does not exist or the rename fails.
    fn rename(&self, from: &Path, to: &Path) -> Result<(), BoxError>;

    /// Copies the bytes of `from` into `to`, overwriting `to` if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` cannot be read or `to` cannot be written.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), BoxError>;

    /// Removes a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be removed.
    fn remove_file(&self, path: &Path) -> Result<(), BoxError>;

    /// Lists the entry names in a directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>, BoxError>;
}
