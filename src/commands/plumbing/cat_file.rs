use crate::areas::repository::Repository;
use crate::artifacts::objects::content_digest::ContentDigest;
use crate::errors::{Missing, RepositoryError};
use std::io::Write;

impl Repository {
    /// Write the stored bytes behind `digest` as they are
    pub fn cat_file(&self, digest: &str) -> crate::errors::Result<()> {
        self.load_state()?;

        let digest = ContentDigest::try_parse(digest.to_string())
            .map_err(|_| RepositoryError::NotFound(Missing::Blob(digest.to_string())))?;
        if !self.database().contains(&digest) {
            return Err(RepositoryError::NotFound(Missing::Blob(digest.to_string())));
        }

        let blob = self.database().load(&digest)?;
        self.writer().write_all(blob.data())?;

        Ok(())
    }
}
