//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::error::BoxError;
use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir(&self, path: &Path) -> Result<(), BoxError> {
        Ok(std::fs::create_dir(path)?)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, BoxError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), BoxError> {
        Ok(std::fs::write(path, contents)?)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), BoxError> {
        Ok(std::fs::rename(from, to)?)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), BoxError> {
        std::fs::copy(from, to)?;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<(), BoxError> {
        Ok(std::fs::remove_file(path)?)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, BoxError> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_overwrites_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("a.bin");
        let to = dir.path().join("b.bin");
        std::fs::write(&from, [0u8, 159, 146, 150]).unwrap();
        std::fs::write(&to, "old").unwrap();

        LiveFileSystem.copy_file(&from, &to).unwrap();

        assert_eq!(std::fs::read(&to).unwrap(), vec![0u8, 159, 146, 150]);
    }

    #[test]
    fn create_dir_fails_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("0");
        LiveFileSystem.create_dir(&target).unwrap();
        assert!(LiveFileSystem.is_dir(&target));
        assert!(LiveFileSystem.create_dir(&target).is_err());
    }

    #[test]
    fn list_dir_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c", "a", "b"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        assert_eq!(LiveFileSystem.list_dir(dir.path()).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn rename_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = dir.path().join("ptr.tmp");
        let ptr = dir.path().join("ptr");
        std::fs::write(&ptr, "0").unwrap();
        std::fs::write(&tmp, "1").unwrap();

        LiveFileSystem.rename(&tmp, &ptr).unwrap();

        assert!(!tmp.exists());
        assert_eq!(std::fs::read_to_string(&ptr).unwrap(), "1");
    }
}
