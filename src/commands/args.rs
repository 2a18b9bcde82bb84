//! Positional argument conventions shared by the commands.
//!
//! Commands take raw tokens after the subcommand name. The tracked file is
//! the first token, a commit message is a trailing `-m <message>` pair, and
//! `history` takes a trailing `-last <n>` pair.

use crate::error::{GvtError, Result};

/// Marker introducing a commit message.
pub const MESSAGE_FLAG: &str = "-m";
/// Marker introducing a history length.
pub const LAST_FLAG: &str = "-last";

/// File named by the first token, unless that token is the message marker.
#[must_use]
pub fn target_file(params: &[String]) -> Option<&str> {
    match params.first() {
        Some(first) if first != MESSAGE_FLAG => Some(first.as_str()),
        _ => None,
    }
}

/// Message from a trailing `-m <message>` pair.
///
/// One surrounding pair of `"` is stripped; inner quotes are left alone.
#[must_use]
pub fn user_message(params: &[String]) -> Option<String> {
    let [.., flag, message] = params else {
        return None;
    };
    if flag != MESSAGE_FLAG {
        return None;
    }
    let unquoted = message
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .filter(|_| message.len() >= 2);
    Some(unquoted.unwrap_or(message).to_string())
}

/// Parses a version id argument.
///
/// # Errors
///
/// Returns [`GvtError::InvalidVersion`] for anything that is not a
/// non-negative integer.
pub fn parse_version(input: &str) -> Result<u64> {
    input.parse().map_err(|_| GvtError::InvalidVersion { input: input.to_string() })
}

/// History length from `-last <n>`.
///
/// Anything other than exactly those two tokens with `n > 0` means "all
/// versions"; a malformed count is ignored rather than rejected.
#[must_use]
pub fn history_limit(params: &[String]) -> Option<usize> {
    match params {
        [flag, count] if flag == LAST_FLAG => count.parse().ok().filter(|n| *n > 0),
        _ => None,
    }
}
