//! Persisted repository state
//!
//! The staging index, commit log, branch table and HEAD are loaded, mutated and
//! written back as one unit. Writes go to a temporary file that is renamed over
//! `.jit/state`, so a reader sees either the previous state or the next one,
//! never a log that grew without its branch moving.

use crate::areas::commit_log::{CommitLog, CommitPosition};
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Packable, Unpackable, read_text, write_text};
use crate::artifacts::state::checksum::Checksum;
use crate::artifacts::state::state_header::StateHeader;
use crate::errors::RepositoryError;
use anyhow::Context;
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use fake::rand;
use std::collections::BTreeMap;
use std::io::{BufRead, Cursor, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Everything a repository operation reads and rewrites
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryState {
    pub index: Index,
    pub log: CommitLog,
    pub refs: Refs,
}

impl RepositoryState {
    pub fn new(head: BranchName) -> Self {
        RepositoryState {
            index: Index::new(),
            log: CommitLog::new(),
            refs: Refs::new(head),
        }
    }

    /// Append `commit` and move the current branch onto it
    pub fn record_commit(&mut self, commit: Commit) -> CommitPosition {
        let position = self.log.append(commit);
        self.refs.update_head(position);
        position
    }
}

impl Packable for RepositoryState {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::new();

        bytes.write_all(&StateHeader::default().serialize()?)?;
        bytes.write_all(&self.index.serialize()?)?;

        bytes.write_u32::<NetworkEndian>(u32::try_from(self.log.len())?)?;
        for commit in self.log.commits() {
            bytes.write_all(&commit.serialize()?)?;
        }

        let branches = self.refs.list_branches().collect::<Vec<_>>();
        bytes.write_u32::<NetworkEndian>(u32::try_from(branches.len())?)?;
        for (name, position) in branches {
            write_text(&mut bytes, name.as_ref())?;
            match position {
                Some(position) => {
                    bytes.write_u8(1)?;
                    bytes.write_u64::<NetworkEndian>(position as u64)?;
                }
                None => bytes.write_u8(0)?,
            }
        }

        write_text(&mut bytes, self.refs.head().as_ref())?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for RepositoryState {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        StateHeader::deserialize(&mut reader)?.validate()?;

        let index = Index::deserialize(&mut reader)?;

        let commits_count = reader.read_u32::<NetworkEndian>()?;
        let commits = (0..commits_count)
            .map(|_| Commit::deserialize(&mut reader))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let log = CommitLog::from_commits(commits);

        let branches_count = reader.read_u32::<NetworkEndian>()?;
        let mut branches = BTreeMap::new();
        for _ in 0..branches_count {
            let name = BranchName::try_parse(read_text(&mut reader)?)?;
            let position = match reader.read_u8()? {
                0 => None,
                1 => Some(reader.read_u64::<NetworkEndian>()? as CommitPosition),
                flag => anyhow::bail!("Invalid position flag {} for branch {}", flag, name),
            };

            if let Some(position) = position
                && position >= log.len()
            {
                anyhow::bail!(
                    "branch {} points past the end of the log ({} >= {})",
                    name,
                    position,
                    log.len()
                );
            }

            branches.insert(name, position);
        }

        let head = BranchName::try_parse(read_text(&mut reader)?)?;
        let refs = Refs::from_parts(branches, head)?;

        Ok(RepositoryState { index, log, refs })
    }
}

/// Reads and atomically replaces `.jit/state`
#[derive(Debug)]
pub struct StateStore {
    path: Box<Path>,
}

impl StateStore {
    pub fn new(path: Box<Path>) -> Self {
        StateStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> crate::errors::Result<RepositoryState> {
        let content = std::fs::read(&self.path)
            .with_context(|| format!("Unable to read state file {}", self.path.display()))?;

        let body = Checksum::verify(Bytes::from(content))
            .map_err(|e| RepositoryError::corrupted(e.to_string()))?;
        let state = RepositoryState::deserialize(Cursor::new(body))
            .map_err(|e| RepositoryError::corrupted(format!("{:#}", e)))?;

        debug!(
            staged = state.index.len(),
            commits = state.log.len(),
            head = %state.refs.head(),
            "loaded repository state"
        );

        Ok(state)
    }

    pub fn persist(&self, state: &RepositoryState) -> crate::errors::Result<()> {
        let body = state.serialize()?.to_vec();
        let mut checksum = Checksum::new();
        checksum.update(&body);
        let content = checksum.seal(body);

        let state_dir = self
            .path
            .parent()
            .with_context(|| format!("Invalid state path {}", self.path.display()))?;
        let temp_path = state_dir.join(format!("tmp-state-{}", rand::random::<u32>()));

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .with_context(|| format!("Unable to open state file {}", temp_path.display()))?;

        let written = file
            .write_all(&content)
            .and_then(|_| file.sync_all())
            .with_context(|| format!("Unable to write state file {}", temp_path.display()))
            .and_then(|_| {
                // rename the temp file over the state file to make it atomic
                std::fs::rename(&temp_path, &self.path).with_context(|| {
                    format!("Unable to rename state file to {}", self.path.display())
                })
            });

        if let Err(e) = written {
            drop(file);
            if let Err(cleanup) = std::fs::remove_file(&temp_path) {
                warn!(path = %temp_path.display(), error = %cleanup, "leftover temp state file");
            }
            return Err(e.into());
        }

        debug!(
            staged = state.index.len(),
            commits = state.log.len(),
            head = %state.refs.head(),
            "persisted repository state"
        );

        Ok(())
    }
}
