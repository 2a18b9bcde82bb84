//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::recording::RecordingFileSystem;
use crate::adapters::replaying::ReplayingFileSystem;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Bundles the port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying, or any caller-supplied filesystem).
pub struct ServiceContext {
    /// Filesystem for repository and working-tree I/O.
    pub fs: Box<dyn FileSystem>,
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context backed by the real disk.
    #[must_use]
    pub fn live() -> Self {
        Self::with_fs(Box::new(LiveFileSystem))
    }

    /// Creates a context around an existing filesystem adapter.
    #[must_use]
    pub fn with_fs(fs: Box<dyn FileSystem>) -> Self {
        Self { fs, recorder: None }
    }

    /// Creates a recording context that captures every filesystem call.
    ///
    /// Uses the live filesystem for actual work. The cassette is written to
    /// `path` by [`ServiceContext::finish`], or on drop as a fallback.
    #[must_use]
    pub fn recording(path: &Path, name: &str, root: &Path) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            name,
            root.display().to_string(),
        )));
        Self {
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder))),
            recorder: Some(recorder),
        }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette = Cassette::from_yaml(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::with_fs(Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette)))))
    }

    /// Writes the cassette if this context is recording.
    ///
    /// Returns the cassette path when one was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be written.
    pub fn finish(mut self) -> Result<Option<std::path::PathBuf>, String> {
        self.write_cassette()
    }

    fn write_cassette(&mut self) -> Result<Option<std::path::PathBuf>, String> {
        let Some(recorder) = self.recorder.take() else {
            return Ok(None);
        };
        // The recording adapter holds the other reference.
        self.fs = Box::new(LiveFileSystem);
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| "Recording adapter for fs still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock for fs poisoned: {e}"))?;
        let path = recorder.finish().map_err(|e| format!("Failed to write fs cassette: {e}"))?;
        Ok(Some(path))
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        if let Err(e) = self.write_cassette() {
            tracing::warn!("failed to write cassette: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_context_writes_cassette_on_finish() {
        let dir = tempfile::tempdir().unwrap();
        let cassette_path = dir.path().join("run.cassette.yaml");

        let ctx = ServiceContext::recording(&cassette_path, "probe", dir.path());
        assert!(ctx.fs.is_dir(dir.path()));
        let written = ctx.finish().unwrap();

        assert_eq!(written, Some(cassette_path.clone()));
        let cassette =
            Cassette::from_yaml(&std::fs::read_to_string(&cassette_path).unwrap()).unwrap();
        assert_eq!(cassette.name, "probe");
        assert_eq!(cassette.count("fs", "is_dir"), 1);
    }

    #[test]
    fn recording_context_writes_cassette_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let cassette_path = dir.path().join("dropped.cassette.yaml");
        {
            let ctx = ServiceContext::recording(&cassette_path, "probe", dir.path());
            let _ = ctx.fs.exists(&dir.path().join("nothing"));
        }
        assert!(cassette_path.exists());
    }

    #[test]
    fn replaying_context_serves_recording() {
        let dir = tempfile::tempdir().unwrap();
        let cassette_path = dir.path().join("run.cassette.yaml");
        let probe = dir.path().join("probe.txt");
        std::fs::write(&probe, "recorded").unwrap();

        let ctx = ServiceContext::recording(&cassette_path, "probe", dir.path());
        assert_eq!(ctx.fs.read_to_string(&probe).unwrap(), "recorded");
        ctx.finish().unwrap();
        std::fs::remove_file(&probe).unwrap();

        let replay = ServiceContext::replaying(&cassette_path).unwrap();
        assert_eq!(replay.fs.read_to_string(&probe).unwrap(), "recorded");
    }

    #[test]
    fn live_context_finish_is_a_no_op() {
        assert_eq!(ServiceContext::live().finish().unwrap(), None);
    }
}
