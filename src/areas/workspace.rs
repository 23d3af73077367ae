use crate::artifacts::ignore::IgnoreMatcher;
use anyhow::Context;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turn a user-supplied path into one relative to the workspace root
    ///
    /// `.` components are dropped, so `.` and `./` resolve to the root itself
    /// (an empty path). Paths escaping the workspace, absolute or through `..`,
    /// yield `None`.
    pub fn relative_path(&self, path: &Path) -> Option<PathBuf> {
        let path = if path.is_absolute() {
            path.strip_prefix(self.path.as_ref()).ok()?
        } else {
            path
        };

        if path
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            return None;
        }

        Some(
            path.components()
                .filter(|component| !matches!(component, Component::CurDir))
                .collect(),
        )
    }

    pub fn exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).exists()
    }

    pub fn is_dir(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_dir()
    }

    /// Every file under `dir_path`, relative to the root, skipping ignored entries
    pub fn list_files(
        &self,
        dir_path: &Path,
        ignore: &dyn IgnoreMatcher,
    ) -> anyhow::Result<Vec<PathBuf>> {
        let root_dir = self.path.join(dir_path);

        WalkDir::new(&root_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .map(|relative| !ignore.should_ignore(relative))
                    .unwrap_or(false)
            })
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(
                    entry
                        .path()
                        .strip_prefix(self.path.as_ref())
                        .map(PathBuf::from)
                        .context("walked outside of the workspace"),
                ),
                Ok(_) => None,
                Err(e) => Some(Err(e.into())),
            })
            .collect()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Vec<u8>> {
        let full_path = self.path.join(file_path);

        std::fs::read(&full_path).with_context(|| format!("Failed to read file: {:?}", file_path))
    }

    /// Overwrite `file_path` with `data`, creating parent directories as needed
    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create parent directories for: {:?}", file_path)
            })?;
        }

        if full_path.is_dir() {
            std::fs::remove_dir_all(&full_path)
                .with_context(|| format!("Failed to remove existing directory: {:?}", file_path))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&full_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }
}
