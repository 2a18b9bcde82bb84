//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::adapters::fs_input::{to_json, CopyInput, PathInput, WriteInput};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::BoxError;
use crate::ports::filesystem::FileSystem;

/// Replays recorded filesystem operations from a cassette.
///
/// Nothing touches the disk; every answer comes from the recording.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    /// Number of recorded interactions not yet replayed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replayer.lock().expect("replayer lock poisoned").remaining()
    }

    fn flag(&self, method: &str, path: &Path) -> bool {
        let output = next_output(&self.replayer, "fs", method, &to_json(&PathInput::new(path)));
        output.as_bool().unwrap_or_else(|| panic!("fs::{method}: expected boolean output"))
    }
}

impl FileSystem for ReplayingFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.flag("exists", path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.flag("is_dir", path)
    }

    fn create_dir(&self, path: &Path) -> Result<(), BoxError> {
        let input = to_json(&PathInput::new(path));
        replay_result(&next_output(&self.replayer, "fs", "create_dir", &input), "fs::create_dir")
    }

    fn read_to_string(&self, path: &Path) -> Result<String, BoxError> {
        let input = to_json(&PathInput::new(path));
        let output = next_output(&self.replayer, "fs", "read_to_string", &input);
        replay_result(&output, "fs::read_to_string")
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), BoxError> {
        let input = to_json(&WriteInput::new(path, contents));
        replay_result(&next_output(&self.replayer, "fs", "write", &input), "fs::write")
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), BoxError> {
        let input = to_json(&CopyInput::new(from, to));
        replay_result(&next_output(&self.replayer, "fs", "rename", &input), "fs::rename")
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), BoxError> {
        let input = to_json(&CopyInput::new(from, to));
        replay_result(&next_output(&self.replayer, "fs", "copy_file", &input), "fs::copy_file")
    }

    fn remove_file(&self, path: &Path) -> Result<(), BoxError> {
        let input = to_json(&PathInput::new(path));
        replay_result(&next_output(&self.replayer, "fs", "remove_file", &input), "fs::remove_file")
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, BoxError> {
        let input = to_json(&PathInput::new(path));
        replay_result(&next_output(&self.replayer, "fs", "list_dir", &input), "fs::list_dir")
    }
}
