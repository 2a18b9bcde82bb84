//! In-memory filesystem for exercising the engine without touching disk.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::BoxError;
use crate::ports::filesystem::FileSystem;

#[derive(Default)]
struct State {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
    failing: BTreeSet<PathBuf>,
}

/// Filesystem held entirely in memory.
///
/// Directories are explicit: `create_dir` needs an existing parent, as on
/// disk. Paths registered with [`MemoryFileSystem::fail_on`] make every
/// mutating call that targets them return an error. Clones share state, so a
/// test can keep a handle while a `ServiceContext` owns another.
#[derive(Default, Clone)]
pub struct MemoryFileSystem {
    state: Arc<Mutex<State>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem containing only `/`.
    #[must_use]
    pub fn new() -> Self {
        let fs = Self::default();
        fs.lock().dirs.insert(PathBuf::from("/"));
        fs
    }

    /// Creates `path` and all missing ancestors.
    pub fn mkdir_all(&self, path: &Path) {
        let mut state = self.lock();
        for ancestor in path.ancestors() {
            state.dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Stores `contents` at `path`, bypassing failure injection.
    pub fn put(&self, path: &Path, contents: impl Into<Vec<u8>>) {
        self.lock().files.insert(path.to_path_buf(), contents.into());
    }

    /// Returns the raw bytes stored at `path`.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<Vec<u8>> {
        self.lock().files.get(path).cloned()
    }

    /// Makes writes, copies, renames, and removals targeting `path` fail.
    pub fn fail_on(&self, path: &Path) {
        self.lock().failing.insert(path.to_path_buf());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("memory fs lock poisoned")
    }
}

impl State {
    fn check(&self, path: &Path) -> Result<(), BoxError> {
        if self.failing.contains(path) {
            return Err(format!("injected failure: {}", path.display()).into());
        }
        Ok(())
    }

    fn check_parent(&self, path: &Path) -> Result<(), BoxError> {
        match path.parent() {
            Some(parent) if self.dirs.contains(parent) => Ok(()),
            _ => Err(format!("No such directory: {}", path.display()).into()),
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let state = self.lock();
        state.dirs.contains(path) || state.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.lock().dirs.contains(path)
    }

    fn create_dir(&self, path: &Path) -> Result<(), BoxError> {
        let mut state = self.lock();
        state.check(path)?;
        state.check_parent(path)?;
        if state.dirs.contains(path) || state.files.contains_key(path) {
            return Err(format!("File exists: {}", path.display()).into());
        }
        state.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> Result<String, BoxError> {
        let state = self.lock();
        let bytes = state
            .files
            .get(path)
            .ok_or_else(|| format!("File not found: {}", path.display()))?;
        Ok(String::from_utf8(bytes.clone())?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), BoxError> {
        let mut state = self.lock();
        state.check(path)?;
        state.check_parent(path)?;
        state.files.insert(path.to_path_buf(), contents.as_bytes().to_vec());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), BoxError> {
        let mut state = self.lock();
        state.check(to)?;
        state.check_parent(to)?;
        let bytes = state
            .files
            .remove(from)
            .ok_or_else(|| format!("File not found: {}", from.display()))?;
        state.files.insert(to.to_path_buf(), bytes);
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), BoxError> {
        let mut state = self.lock();
        state.check(to)?;
        state.check_parent(to)?;
        let bytes = state
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", from.display()))?;
        state.files.insert(to.to_path_buf(), bytes);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<(), BoxError> {
        let mut state = self.lock();
        state.check(path)?;
        state
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, BoxError> {
        let state = self.lock();
        if !state.dirs.contains(path) {
            return Err(format!("Not a directory: {}", path.display()).into());
        }
        let children = state.dirs.iter().chain(state.files.keys()).filter_map(|p| {
            if p.parent() == Some(path) {
                p.file_name().map(|n| n.to_string_lossy().into_owned())
            } else {
                None
            }
        });
        let mut names: Vec<String> = children.collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dir_requires_parent() {
        let fs = MemoryFileSystem::new();
        assert!(fs.create_dir(Path::new("/a/b")).is_err());
        fs.create_dir(Path::new("/a")).unwrap();
        fs.create_dir(Path::new("/a/b")).unwrap();
        assert!(fs.is_dir(Path::new("/a/b")));
    }

    #[test]
    fn list_dir_includes_files_and_dirs() {
        let fs = MemoryFileSystem::new();
        fs.mkdir_all(Path::new("/w/sub"));
        fs.put(Path::new("/w/z.txt"), "z");
        fs.put(Path::new("/w/sub/deep.txt"), "d");
        assert_eq!(fs.list_dir(Path::new("/w")).unwrap(), vec!["sub", "z.txt"]);
    }

    #[test]
    fn injected_failures_block_mutations_only() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/f.txt");
        fs.put(path, "keep");
        fs.fail_on(path);
        assert!(fs.write(path, "x").is_err());
        assert!(fs.remove_file(path).is_err());
        assert_eq!(fs.read_to_string(path).unwrap(), "keep");
    }
}
