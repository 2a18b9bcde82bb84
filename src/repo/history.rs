//! History walker: versions from newest to oldest.

use std::fmt;

use super::Repository;
use crate::error::Result;

/// One line of `gvt history`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Version id.
    pub id: u64,
    /// First line of the version's commit message.
    pub message: String,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.message)
    }
}

/// Lazy walk from `latest` down to version 0.
///
/// Each message is read only when its entry is requested.
pub struct History<'r, 'a> {
    repo: &'r Repository<'a>,
    next: Option<u64>,
    remaining: usize,
}

impl Iterator for History<'_, '_> {
    type Item = Result<HistoryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.next?;
        self.next = id.checked_sub(1);
        self.remaining -= 1;
        Some(self.repo.read_message(id).map(|message| HistoryEntry {
            id,
            message: message.lines().next().unwrap_or_default().to_string(),
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self
            .next
            .map_or(0, |id| usize::try_from(id).map_or(usize::MAX, |n| n.saturating_add(1)));
        let n = left.min(self.remaining);
        (n, Some(n))
    }
}

impl<'a> Repository<'a> {
    /// Walks versions newest first, yielding at most `limit` entries
    /// (all of them when `None`).
    ///
    /// # Errors
    ///
    /// Returns an error if the latest pointer cannot be read. Message read
    /// failures surface per entry.
    pub fn history(&self, limit: Option<usize>) -> Result<History<'_, 'a>> {
        let latest = self.read_latest()?;
        Ok(History { repo: self, next: Some(latest), remaining: limit.unwrap_or(usize::MAX) })
    }
}
