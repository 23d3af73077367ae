use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::content_digest::ContentDigest;
use crate::errors::RepositoryError;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Print the digest of a working file, storing its content when `write` is set
    pub fn hash_object(&self, file: &Path, write: bool) -> crate::errors::Result<ContentDigest> {
        let relative = self
            .workspace()
            .relative_path(file)
            .filter(|relative| {
                self.workspace().exists(relative) && !self.workspace().is_dir(relative)
            })
            .ok_or_else(|| RepositoryError::path_not_found(file))?;

        let blob = Blob::new(self.workspace().read_file(&relative)?);
        let digest = blob.digest();

        if write {
            // only an initialized repository has an object store to write into
            self.load_state()?;
            self.database().store(&blob)?;
        }

        writeln!(self.writer(), "{}", digest)?;

        Ok(digest)
    }
}

#[cfg(test)]
mod tests {
    use crate::areas::repository::Repository;
    use crate::areas::repository::fixtures::{open, open_with_output, repository_dir};
    use crate::errors::{Missing, RepositoryError};
    use assert_fs::TempDir;
    use assert_fs::prelude::{FileWriteStr, PathChild};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    fn prints_digest_without_storing(repository_dir: TempDir) -> anyhow::Result<()> {
        repository_dir.child("a.txt").write_str("hello")?;
        let (repository, output) = open_with_output(&repository_dir);

        let digest = repository.hash_object(Path::new("a.txt"), false)?;

        assert_eq!(digest.as_ref(), "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
        assert_eq!(output.contents(), format!("{digest}\n"));
        assert!(!repository.database().contains(&digest));
        Ok(())
    }

    #[rstest]
    fn write_stores_the_blob(repository_dir: TempDir) -> anyhow::Result<()> {
        repository_dir.child("a.txt").write_str("hello")?;
        let repository = open(&repository_dir);

        let digest = repository.hash_object(Path::new("a.txt"), true)?;

        let stored = repository.database().load(&digest)?;
        assert_eq!(stored.data().as_ref(), b"hello");
        Ok(())
    }

    #[test]
    fn write_requires_a_repository() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("a.txt").write_str("hello")?;
        let repository = Repository::new(dir.path(), Box::new(std::io::sink()))?;

        assert!(repository.hash_object(Path::new("a.txt"), false).is_ok());
        assert!(matches!(
            repository.hash_object(Path::new("a.txt"), true),
            Err(RepositoryError::NotInitialized(_))
        ));
        Ok(())
    }

    #[rstest]
    fn missing_file_is_not_found(repository_dir: TempDir) {
        let result = open(&repository_dir).hash_object(Path::new("nope.txt"), false);

        assert!(matches!(
            result,
            Err(RepositoryError::NotFound(Missing::Path(_)))
        ));
    }
}
