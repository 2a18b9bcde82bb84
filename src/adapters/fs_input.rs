//! Cassette input shapes shared by the recording and replaying filesystems.

use std::path::Path;

use serde::Serialize;

#[derive(Serialize)]
pub(crate) struct PathInput {
    path: String,
}

impl PathInput {
    pub(crate) fn new(path: &Path) -> Self {
        Self { path: path.display().to_string() }
    }
}

#[derive(Serialize)]
pub(crate) struct WriteInput<'a> {
    path: String,
    contents: &'a str,
}

impl<'a> WriteInput<'a> {
    pub(crate) fn new(path: &Path, contents: &'a str) -> Self {
        Self { path: path.display().to_string(), contents }
    }
}

#[derive(Serialize)]
pub(crate) struct CopyInput {
    from: String,
    to: String,
}

impl CopyInput {
    pub(crate) fn new(from: &Path, to: &Path) -> Self {
        Self { from: from.display().to_string(), to: to.display().to_string() }
    }
}

/// Serializes an input shape for comparison against a recorded one.
pub(crate) fn to_json<I: Serialize>(input: &I) -> serde_json::Value {
    serde_json::to_value(input).expect("failed to serialize replay input")
}
