//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use super::Tape;
use crate::adapters::fs_input::{CopyInput, PathInput, WriteInput};
use crate::cassette::recorder::CassetteRecorder;
use crate::error::BoxError;
use crate::ports::FileSystem;

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    tape: Tape,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, tape: Tape::new("fs", recorder) }
    }
}

impl FileSystem for RecordingFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let result = self.inner.exists(path);
        self.tape.value("exists", &PathInput::new(path), &result);
        result
    }

    fn is_dir(&self, path: &Path) -> bool {
        let result = self.inner.is_dir(path);
        self.tape.value("is_dir", &PathInput::new(path), &result);
        result
    }

    fn create_dir(&self, path: &Path) -> Result<(), BoxError> {
        let result = self.inner.create_dir(path);
        self.tape.result("create_dir", &PathInput::new(path), &result);
        result
    }

    fn read_to_string(&self, path: &Path) -> Result<String, BoxError> {
        let result = self.inner.read_to_string(path);
        self.tape.result("read_to_string", &PathInput::new(path), &result);
        result
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), BoxError> {
        let result = self.inner.write(path, contents);
        self.tape.result("write", &WriteInput::new(path, contents), &result);
        result
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), BoxError> {
        let result = self.inner.rename(from, to);
        self.tape.result("rename", &CopyInput::new(from, to), &result);
        result
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), BoxError> {
        let result = self.inner.copy_file(from, to);
        self.tape.result("copy_file", &CopyInput::new(from, to), &result);
        result
    }

    fn remove_file(&self, path: &Path) -> Result<(), BoxError> {
        let result = self.inner.remove_file(path);
        self.tape.result("remove_file", &PathInput::new(path), &result);
        result
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, BoxError> {
        let result = self.inner.list_dir(path);
        self.tape.result("list_dir", &PathInput::new(path), &result);
        result
    }
}
