//! Replaying adapters that replay recorded interactions.

pub mod filesystem;

use std::sync::Mutex;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::BoxError;

pub use filesystem::ReplayingFileSystem;

/// Return the recorded output of the next matching interaction.
///
/// Counterpart of `recording::Tape::value`.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
    input: &serde_json::Value,
) -> serde_json::Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method, input).output.clone()
}

/// Decode a recorded `{"Ok": v}` / `{"Err": msg}` value.
///
/// Counterpart of `recording::Tape::result`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, BoxError> {
    if let Some(err) = output.get("Err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("Ok").cloned().unwrap_or(serde_json::Value::Null);
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
