//! Checkout engine: reconciles the working directory with a stored version.

use tracing::{debug, info, warn};

use super::Repository;
use crate::error::Result;

impl Repository<'_> {
    /// Makes the working directory mirror version `target` and points
    /// `active` at it.
    ///
    /// Only files the tool knows about are touched: every file stored in the
    /// currently active version is removed from the working directory (a
    /// missing one is skipped), then every file stored in `target` is copied
    /// in, overwriting. Untracked working files survive.
    ///
    /// The two phases are not transactional. If a copy fails, the working
    /// directory is left half reconciled and `active` is not moved.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GvtError::InvalidVersion`] if `target` is past
    /// `latest`, and [`crate::error::GvtError::Io`] if any filesystem step fails.
    pub fn checkout(&self, target: u64) -> Result<()> {
        self.ensure_exists(target)?;
        let active = self.read_active()?;
        debug!(active, target, "checking out");

        for name in self.snapshot_files(active)? {
            let path = self.working_path(&name);
            if !self.ctx.fs.exists(&path) {
                warn!(file = %name, "tracked file already missing from working directory");
                continue;
            }
            self.ctx
                .fs
                .remove_file(&path)
                .map_err(|e| self.io_error(format!("remove working copy of {name}"), e))?;
        }

        let source_dir = self.version_path(target);
        for name in self.snapshot_files(target)? {
            self.ctx
                .fs
                .copy_file(&source_dir.join(&name), &self.working_path(&name))
                .map_err(|e| self.io_error(format!("restore {name} from version {target}"), e))?;
        }

        self.write_active(target)?;
        info!(target, "checked out version");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::super::test_support::{memory_context, root};
    use super::super::{Mutation, MutationKind};
    use crate::adapters::memory::MemoryFileSystem;
    use crate::context::ServiceContext;
    use crate::error::{GvtError, Operation};
    use crate::ports::FileSystem;
    use crate::repo::Repository;

    fn work(name: &str) -> PathBuf {
        root().join(name)
    }

    fn content(fs: &MemoryFileSystem, name: &str) -> Option<String> {
        fs.get(&work(name)).map(|b| String::from_utf8(b).unwrap())
    }

    /// v1: foo=A, v2: foo=B, v3: foo=B + bar=bar.
    fn three_versions(ctx: &ServiceContext, fs: &MemoryFileSystem) {
        let repo = Repository::init(ctx, root()).unwrap();
        fs.put(&work("foo.txt"), "A");
        repo.apply(&Mutation::new(MutationKind::Add, "foo.txt")).unwrap();
        fs.put(&work("foo.txt"), "B");
        repo.apply(&Mutation::new(MutationKind::Commit, "foo.txt")).unwrap();
        fs.put(&work("bar.txt"), "bar");
        repo.apply(&Mutation::new(MutationKind::Add, "bar.txt")).unwrap();
    }

    #[test]
    fn restores_older_content_and_moves_active() {
        let (ctx, fs) = memory_context();
        three_versions(&ctx, &fs);
        let repo = Repository::open(&ctx, root(), Operation::Checkout).unwrap();

        repo.checkout(1).unwrap();

        assert_eq!(content(&fs, "foo.txt").as_deref(), Some("A"));
        assert_eq!(content(&fs, "bar.txt"), None, "file tracked later is removed");
        assert_eq!(repo.read_active().unwrap(), 1);
        assert_eq!(repo.read_latest().unwrap(), 3);
    }

    #[test]
    fn round_trip_restores_prior_state() {
        let (ctx, fs) = memory_context();
        three_versions(&ctx, &fs);
        let repo = Repository::open(&ctx, root(), Operation::Checkout).unwrap();
        let before = repo.read_active().unwrap();

        for target in 0..=3 {
            repo.checkout(target).unwrap();
            repo.checkout(before).unwrap();
            assert_eq!(content(&fs, "foo.txt").as_deref(), Some("B"));
            assert_eq!(content(&fs, "bar.txt").as_deref(), Some("bar"));
        }
    }

    #[test]
    fn checkout_zero_clears_tracked_files() {
        let (ctx, fs) = memory_context();
        three_versions(&ctx, &fs);
        let repo = Repository::open(&ctx, root(), Operation::Checkout).unwrap();

        repo.checkout(0).unwrap();

        assert_eq!(content(&fs, "foo.txt"), None);
        assert_eq!(content(&fs, "bar.txt"), None);
    }

    #[test]
    fn untracked_files_survive() {
        let (ctx, fs) = memory_context();
        three_versions(&ctx, &fs);
        fs.put(&work("scratch.txt"), "mine");
        let repo = Repository::open(&ctx, root(), Operation::Checkout).unwrap();

        repo.checkout(0).unwrap();

        assert_eq!(content(&fs, "scratch.txt").as_deref(), Some("mine"));
    }

    #[test]
    fn missing_working_copy_is_tolerated() {
        let (ctx, fs) = memory_context();
        three_versions(&ctx, &fs);
        fs.remove_file(&work("bar.txt")).unwrap();
        let repo = Repository::open(&ctx, root(), Operation::Checkout).unwrap();

        repo.checkout(2).unwrap();

        assert_eq!(content(&fs, "foo.txt").as_deref(), Some("B"));
        assert_eq!(repo.read_active().unwrap(), 2);
    }

    #[test]
    fn out_of_range_target_changes_nothing() {
        let (ctx, fs) = memory_context();
        three_versions(&ctx, &fs);
        let repo = Repository::open(&ctx, root(), Operation::Checkout).unwrap();

        let err = repo.checkout(4).unwrap_err();

        assert!(matches!(err, GvtError::InvalidVersion { .. }));
        assert_eq!(repo.read_active().unwrap(), 3);
        assert_eq!(content(&fs, "bar.txt").as_deref(), Some("bar"));
    }

    #[test]
    fn failed_restore_keeps_active_pointer() {
        let (ctx, fs) = memory_context();
        three_versions(&ctx, &fs);
        fs.fail_on(&work("foo.txt"));
        let repo = Repository::open(&ctx, root(), Operation::Checkout).unwrap();

        let err = repo.checkout(1).unwrap_err();

        assert_eq!(err.exit_code(), -3);
        assert_eq!(repo.read_active().unwrap(), 3);
    }
}
