use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{Existing, RepositoryError};
use anyhow::Context;
use std::fs;
use std::io::Write;
use tracing::info;

impl Repository {
    pub fn init(&mut self) -> crate::errors::Result<()> {
        let repository_dir = self.repository_dir();
        if repository_dir.exists() {
            return Err(RepositoryError::AlreadyExists(Existing::Repository(
                repository_dir,
            )));
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .jit/objects directory")?;

        let state = RepositoryState::new(BranchName::default_branch());
        self.persist_state(&state)?;

        info!(
            path = %repository_dir.display(),
            head = %state.refs.head(),
            "initialized repository"
        );
        writeln!(
            self.writer(),
            "Initialized empty jit repository in {}",
            repository_dir.display()
        )?;

        Ok(())
    }
}
