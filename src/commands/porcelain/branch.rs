use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use colored::Colorize;
use std::io::Write;
use tracing::info;

impl Repository {
    /// Cut `name` at the current branch's position without touching the log
    pub fn create_branch(&mut self, name: &str) -> crate::errors::Result<()> {
        let branch_name = BranchName::try_parse(name.to_string())?;
        let mut state = self.load_state()?;

        let start = state.refs.create_branch(branch_name.clone())?;
        self.persist_state(&state)?;

        info!(branch = %branch_name, ?start, "created branch");
        match start {
            Some(position) => writeln!(
                self.writer(),
                "Created branch '{}' at commit {}",
                branch_name,
                position
            )?,
            None => writeln!(self.writer(), "Created branch '{}'", branch_name)?,
        }

        Ok(())
    }

    pub fn list_branches(&self) -> crate::errors::Result<()> {
        let state = self.load_state()?;

        for (name, position) in state.refs.list_branches() {
            let position = position
                .map(|position| position.to_string())
                .unwrap_or_else(|| "(no commits)".to_string());

            if state.refs.is_current_branch(name) {
                writeln!(self.writer(), "* {} {}", name.as_ref().green(), position)?;
            } else {
                writeln!(self.writer(), "  {} {}", name, position)?;
            }
        }

        Ok(())
    }
}
