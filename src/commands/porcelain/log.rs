use crate::areas::commit_log::CommitPosition;
use crate::areas::refs::Refs;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Print every commit, most recent first
    pub fn log(&self) -> crate::errors::Result<()> {
        let state = self.load_state()?;

        if state.log.is_empty() {
            writeln!(
                self.writer(),
                "Branch '{}' does not have any commits yet",
                state.refs.head()
            )?;
            return Ok(());
        }

        for (position, commit) in state.log.iter_rev() {
            self.show_commit(position, commit, &state.refs)?;
            writeln!(self.writer())?;
        }

        Ok(())
    }

    fn show_commit(
        &self,
        position: CommitPosition,
        commit: &Commit,
        refs: &Refs,
    ) -> crate::errors::Result<()> {
        writeln!(
            self.writer(),
            "{}{}",
            format!("commit {position}").yellow(),
            commit_decoration(position, refs)
        )?;
        writeln!(self.writer(), "Date:   {}", commit.readable_timestamp())?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }
        writeln!(self.writer())?;
        for (path, digest) in commit.snapshot().iter() {
            writeln!(
                self.writer(),
                "    {} {}",
                digest.to_short_digest(),
                path.display()
            )?;
        }

        Ok(())
    }
}

fn commit_decoration(position: CommitPosition, refs: &Refs) -> String {
    let reverse_refs = refs.reverse_refs();
    let Some(names) = reverse_refs.get(&position) else {
        return String::new();
    };

    let names = names
        .iter()
        .map(|name| {
            if refs.is_current_branch(name) {
                format!("HEAD -> {name}").cyan().bold().to_string()
            } else {
                name.as_ref().green().bold().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(" ({names})")
}
