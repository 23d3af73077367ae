use crate::areas::commit_log::CommitPosition;
use crate::areas::repository::Repository;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Write the bytes `path` had in the commit at `position`
    pub fn show(&self, position: CommitPosition, path: &Path) -> crate::errors::Result<()> {
        let relative = self
            .workspace()
            .relative_path(path)
            .unwrap_or_else(|| path.to_path_buf());
        let content = self.archived_content(position, &relative)?;

        self.writer().write_all(&content)?;

        Ok(())
    }
}
