//! Version inspector.

use std::fmt;

use super::Repository;
use crate::error::Result;

/// A stored version's id and full commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    /// Version id.
    pub id: u64,
    /// Commit message exactly as stored.
    pub message: String,
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version: {}\n{}", self.id, self.message)
    }
}

impl Repository<'_> {
    /// Reads version `id`, or the active version when `id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GvtError::InvalidVersion`] if `id` is past
    /// `latest`, or an I/O error if the pointers or message cannot be read.
    pub fn inspect(&self, id: Option<u64>) -> Result<VersionRecord> {
        let id = match id {
            Some(id) => id,
            None => self.read_active()?,
        };
        self.ensure_exists(id)?;
        Ok(VersionRecord { id, message: self.read_message(id)? })
    }
}
