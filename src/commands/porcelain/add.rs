use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Per-path outcome of staging
///
/// Paths that cannot be staged never reach the index; they are reported here
/// instead of failing the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    pub staged: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub ignored: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
    /// Names that are not valid UTF-8 and so cannot be recorded
    pub invalid: Vec<PathBuf>,
    pub unreadable: Vec<PathBuf>,
}

impl StageReport {
    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    pub fn failed_count(&self) -> usize {
        self.missing.len() + self.invalid.len() + self.unreadable.len()
    }

    /// False when any requested path could not be staged
    pub fn is_complete(&self) -> bool {
        self.failed_count() == 0
    }
}

impl Repository {
    pub fn add<P: AsRef<Path>>(&mut self, paths: &[P]) -> crate::errors::Result<StageReport> {
        let mut state = self.load_state()?;
        let mut report = StageReport::default();

        for requested in paths {
            let requested = requested.as_ref();

            let relative = match self.workspace().relative_path(requested) {
                Some(relative) if self.workspace().exists(&relative) => relative,
                _ => {
                    warn!(path = %requested.display(), "cannot stage missing path");
                    writeln!(self.writer(), "File {} does not exist", requested.display())?;
                    report.missing.push(requested.to_path_buf());
                    continue;
                }
            };

            if self.ignore().should_ignore(&relative) {
                writeln!(self.writer(), "Ignoring {}", relative.display())?;
                report.ignored.push(relative);
                continue;
            }

            let files = if self.workspace().is_dir(&relative) {
                self.workspace().list_files(&relative, self.ignore())?
            } else {
                vec![relative]
            };

            for file in files {
                self.stage_file(&mut state.index, file, &mut report)?;
            }
        }

        if report.staged_count() > 0 {
            self.persist_state(&state)?;
            writeln!(
                self.writer(),
                "Added {} file(s) to the index",
                report.staged_count()
            )?;
        }

        Ok(report)
    }

    /// Whether `path` differs from what the index holds for it
    pub fn has_changes(&self, path: &Path) -> crate::errors::Result<bool> {
        let state = self.load_state()?;
        let data = self.workspace().read_file(path)?;

        Ok(state.index.has_changes(path, &Blob::new(data).digest()))
    }

    fn stage_file(
        &self,
        index: &mut Index,
        path: PathBuf,
        report: &mut StageReport,
    ) -> crate::errors::Result<()> {
        if path.to_str().is_none() {
            warn!(path = %path.display(), "cannot stage a name that is not valid UTF-8");
            writeln!(self.writer(), "Invalid file name {}", path.display())?;
            report.invalid.push(path);
            return Ok(());
        }

        let data = match self.workspace().read_file(&path) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %path.display(), error = %format!("{:#}", e), "cannot read file");
                writeln!(self.writer(), "Unable to read {}", path.display())?;
                report.unreadable.push(path);
                return Ok(());
            }
        };

        let blob = Blob::new(data);
        let digest = blob.digest();

        if !index.has_changes(&path, &digest) {
            debug!(path = %path.display(), "unchanged since last add");
            writeln!(self.writer(), "No changes made to {}", path.display())?;
            report.unchanged.push(path);
            return Ok(());
        }

        self.database().store(&blob)?;
        debug!(path = %path.display(), digest = %digest.to_short_digest(), "staged");
        index.add(path.clone(), digest);
        report.staged.push(path);

        Ok(())
    }
}
