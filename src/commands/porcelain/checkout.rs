use crate::areas::commit_log::CommitPosition;
use crate::areas::repository::Repository;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::io::Write;
use std::path::Path;
use tracing::debug;

impl Repository {
    /// Restore the working files recorded by the commit at `position`
    ///
    /// Files the commit does not track are left alone, and HEAD, the branch
    /// table and the index are unchanged.
    pub fn checkout(&mut self, position: CommitPosition) -> crate::errors::Result<()> {
        let state = self.load_state()?;
        let commit = state.log.get(position)?;

        for (path, digest) in commit.snapshot().iter() {
            let blob = self.database().load(digest)?;
            self.workspace().write_file(path, blob.data())?;
            debug!(path = %path.display(), position, "restored");
        }

        writeln!(
            self.writer(),
            "Checked out commit {}: {}",
            position,
            commit.short_message()
        )?;

        Ok(())
    }

    /// Bytes recorded for `path` by the commit at `position`
    pub fn archived_content(
        &self,
        position: CommitPosition,
        path: &Path,
    ) -> crate::errors::Result<Bytes> {
        let state = self.load_state()?;
        let digest = state
            .log
            .get(position)?
            .snapshot()
            .get(path)
            .cloned()
            .ok_or_else(|| RepositoryError::path_not_found(path))?;

        Ok(self.database().load(&digest)?.data().clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::areas::repository::fixtures::{commit_files, open, repository_dir};
    use crate::errors::{Missing, RepositoryError};
    use assert_fs::TempDir;
    use assert_fs::prelude::{FileWriteStr, PathChild};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    fn checkout_restores_archived_bytes(repository_dir: TempDir) -> anyhow::Result<()> {
        commit_files(
            &repository_dir,
            &[("a.txt", "hello"), ("nested/b.txt", "bee")],
            "first",
        );
        repository_dir.child("a.txt").write_str("changed")?;
        std::fs::remove_dir_all(repository_dir.path().join("nested"))?;
        let mut repository = open(&repository_dir);

        repository.checkout(0)?;

        for path in ["a.txt", "nested/b.txt"] {
            let on_disk = std::fs::read(repository_dir.path().join(path))?;
            let archived = repository.archived_content(0, Path::new(path))?;
            assert_eq!(on_disk, archived.to_vec());
        }
        let restored = std::fs::read_to_string(repository_dir.path().join("a.txt"))?;
        assert_eq!(restored, "hello");
        Ok(())
    }

    #[rstest]
    fn untracked_files_survive_checkout(repository_dir: TempDir) -> anyhow::Result<()> {
        commit_files(&repository_dir, &[("a.txt", "hello")], "first");
        repository_dir.child("notes.txt").write_str("keep me")?;

        open(&repository_dir).checkout(0)?;

        assert_eq!(
            std::fs::read_to_string(repository_dir.path().join("notes.txt"))?,
            "keep me"
        );
        Ok(())
    }

    #[rstest]
    fn checkout_leaves_head_and_branches_alone(repository_dir: TempDir) -> anyhow::Result<()> {
        commit_files(&repository_dir, &[("a.txt", "hello")], "first");
        commit_files(&repository_dir, &[("a.txt", "hello world")], "second");
        let mut repository = open(&repository_dir);
        let before = repository.load_state()?;

        repository.checkout(0)?;

        assert_eq!(repository.load_state()?, before);
        Ok(())
    }

    #[rstest]
    #[case(1)]
    #[case(42)]
    fn position_outside_log_is_not_found(
        repository_dir: TempDir,
        #[case] position: usize,
    ) -> anyhow::Result<()> {
        commit_files(&repository_dir, &[("a.txt", "hello")], "first");

        let result = open(&repository_dir).checkout(position);

        assert!(matches!(
            result,
            Err(RepositoryError::NotFound(Missing::Commit { len: 1, .. }))
        ));
        Ok(())
    }

    #[rstest]
    fn archived_content_of_untracked_path_is_not_found(
        repository_dir: TempDir,
    ) -> anyhow::Result<()> {
        commit_files(&repository_dir, &[("a.txt", "hello")], "first");

        let result = open(&repository_dir).archived_content(0, Path::new("b.txt"));

        assert!(matches!(
            result,
            Err(RepositoryError::NotFound(Missing::Path(_)))
        ));
        Ok(())
    }
}
