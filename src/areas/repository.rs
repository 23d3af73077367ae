use crate::areas::database::Database;
use crate::areas::state::{RepositoryState, StateStore};
use crate::areas::workspace::Workspace;
use crate::artifacts::ignore::{IgnoreMatcher, IgnoredComponents, REPOSITORY_DIR};
use crate::artifacts::merge::strategy::{MergeStrategy, TwoWayMerge};
use crate::errors::RepositoryError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    state_store: StateStore,
    ignore: Box<dyn IgnoreMatcher>,
    merge_strategy: Box<dyn MergeStrategy>,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> crate::errors::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory {}", path.display()))?;
        }

        let path = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", path.display()))?;
        let repository_dir = path.join(REPOSITORY_DIR);

        Ok(Repository {
            database: Database::new(repository_dir.join("objects").into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            state_store: StateStore::new(repository_dir.join("state").into_boxed_path()),
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            ignore: Box::new(IgnoredComponents::default()),
            merge_strategy: Box::new(TwoWayMerge),
        })
    }

    pub fn with_ignore_matcher(mut self, ignore: Box<dyn IgnoreMatcher>) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn with_merge_strategy(mut self, merge_strategy: Box<dyn MergeStrategy>) -> Self {
        self.merge_strategy = merge_strategy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repository_dir(&self) -> PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn state_store(&self) -> &StateStore {
        &self.state_store
    }

    pub fn ignore(&self) -> &dyn IgnoreMatcher {
        self.ignore.as_ref()
    }

    pub fn merge_strategy(&self) -> &dyn MergeStrategy {
        self.merge_strategy.as_ref()
    }

    /// Load the persisted state, `NotInitialized` when there is none
    pub fn load_state(&self) -> crate::errors::Result<RepositoryState> {
        if !self.state_store.exists() {
            return Err(RepositoryError::NotInitialized(self.path.to_path_buf()));
        }

        self.state_store.load()
    }

    pub fn persist_state(&self, state: &RepositoryState) -> crate::errors::Result<()> {
        self.state_store.persist(state)
    }
}
