use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;
use std::io::Write;
use tracing::info;

impl Repository {
    /// Point HEAD at `name`; working files are not rewritten
    pub fn switch_branch(&mut self, name: &str) -> crate::errors::Result<()> {
        // a name that could never have been created cannot exist
        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| RepositoryError::branch_not_found(name))?;
        let mut state = self.load_state()?;

        if state.refs.is_current_branch(&branch_name) {
            writeln!(self.writer(), "Already on '{}'", branch_name)?;
            return Ok(());
        }

        state.refs.set_head(branch_name.clone())?;
        self.persist_state(&state)?;

        info!(branch = %branch_name, "switched HEAD");
        writeln!(self.writer(), "Switched to branch '{}'", branch_name)?;

        Ok(())
    }
}
