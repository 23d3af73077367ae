//! Commit log
//!
//! One append-only sequence of commits shared by every branch. A commit is
//! addressed by its position in the log; once a position is filled it never
//! changes.

use crate::artifacts::objects::commit::Commit;
use crate::errors::{Missing, RepositoryError};

/// Index of a commit inside the log
pub type CommitPosition = usize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitLog {
    commits: Vec<Commit>,
}

impl CommitLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_commits(commits: Vec<Commit>) -> Self {
        CommitLog { commits }
    }

    /// Append a commit, returning the position it landed at
    pub fn append(&mut self, commit: Commit) -> CommitPosition {
        self.commits.push(commit);
        self.commits.len() - 1
    }

    pub fn get(&self, position: CommitPosition) -> crate::errors::Result<&Commit> {
        self.commits
            .get(position)
            .ok_or(RepositoryError::NotFound(Missing::Commit {
                position,
                len: self.commits.len(),
            }))
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn commits(&self) -> impl Iterator<Item = &Commit> {
        self.commits.iter()
    }

    /// Commits with their positions, most recent first
    pub fn iter_rev(&self) -> impl Iterator<Item = (CommitPosition, &Commit)> {
        self.commits.iter().enumerate().rev()
    }
}
