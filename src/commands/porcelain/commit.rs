use crate::areas::commit_log::CommitPosition;
use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepositoryError;
use std::io::Write;
use tracing::{info, warn};

impl Repository {
    pub fn commit(&mut self, message: &str) -> crate::errors::Result<CommitPosition> {
        let mut state = self.load_state()?;

        if state.index.is_empty() {
            return Err(RepositoryError::EmptyStage);
        }

        self.ensure_blobs(&state)?;

        let is_root = state.log.is_empty();
        let commit = Commit::new(message.trim().to_string(), state.index.snapshot());
        let short_message = commit.short_message();

        // log append, branch move and index reset land in a single persist
        let position = state.record_commit(commit);
        state.index.clear();
        self.persist_state(&state)?;

        info!(position, branch = %state.refs.head(), "created commit");
        writeln!(
            self.writer(),
            "[{} {}{}] {}",
            state.refs.head(),
            if is_root { "(root-commit) " } else { "" },
            position,
            short_message
        )?;

        Ok(position)
    }

    /// Every staged digest must be readable from the object store once committed
    fn ensure_blobs(&self, state: &RepositoryState) -> crate::errors::Result<()> {
        for (path, digest) in state.index.entries() {
            if self.database().contains(digest) {
                continue;
            }

            warn!(path = %path.display(), "staged blob missing, restoring from workspace");
            let blob = Blob::new(self.workspace().read_file(path)?);
            if &blob.digest() != digest {
                return Err(RepositoryError::corrupted(format!(
                    "content staged for {} is no longer available",
                    path.display()
                )));
            }

            self.database().store(&blob)?;
        }

        Ok(())
    }
}
