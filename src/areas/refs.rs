//! Branch table and HEAD
//!
//! A branch is a name pointing at a position in the shared commit log. A branch
//! cut before the first commit points nowhere yet (`None`). HEAD names the
//! branch that new commits advance.

use crate::areas::commit_log::CommitPosition;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{Existing, RepositoryError};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refs {
    branches: BTreeMap<BranchName, Option<CommitPosition>>,
    head: BranchName,
}

impl Refs {
    /// Refs of a fresh repository: a single empty branch checked out
    pub fn new(head: BranchName) -> Self {
        Refs {
            branches: BTreeMap::from([(head.clone(), None)]),
            head,
        }
    }

    pub(crate) fn from_parts(
        branches: BTreeMap<BranchName, Option<CommitPosition>>,
        head: BranchName,
    ) -> anyhow::Result<Self> {
        if !branches.contains_key(&head) {
            anyhow::bail!("HEAD points to unknown branch {}", head);
        }

        Ok(Refs { branches, head })
    }

    pub fn head(&self) -> &BranchName {
        &self.head
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> bool {
        &self.head == branch_name
    }

    /// Position of the current branch
    pub fn read_head(&self) -> Option<CommitPosition> {
        self.branches.get(&self.head).copied().flatten()
    }

    /// Position of `branch_name`, `NotFound` if the branch does not exist
    pub fn read_ref(
        &self,
        branch_name: &BranchName,
    ) -> crate::errors::Result<Option<CommitPosition>> {
        self.branches
            .get(branch_name)
            .copied()
            .ok_or_else(|| RepositoryError::branch_not_found(branch_name.as_ref()))
    }

    /// Create `name` at the current branch's position
    pub fn create_branch(
        &mut self,
        name: BranchName,
    ) -> crate::errors::Result<Option<CommitPosition>> {
        if self.branches.contains_key(&name) {
            return Err(RepositoryError::AlreadyExists(Existing::Branch(
                name.to_string(),
            )));
        }

        let start = self.read_head();
        self.branches.insert(name, start);

        Ok(start)
    }

    pub fn set_head(&mut self, name: BranchName) -> crate::errors::Result<()> {
        if !self.branches.contains_key(&name) {
            return Err(RepositoryError::branch_not_found(name.as_ref()));
        }

        self.head = name;
        Ok(())
    }

    /// Move the current branch to `position`
    pub fn update_head(&mut self, position: CommitPosition) {
        self.branches.insert(self.head.clone(), Some(position));
    }

    pub fn list_branches(&self) -> impl Iterator<Item = (&BranchName, Option<CommitPosition>)> {
        self.branches
            .iter()
            .map(|(name, position)| (name, *position))
    }

    /// Branch names grouped by the position they point at
    pub fn reverse_refs(&self) -> BTreeMap<CommitPosition, Vec<&BranchName>> {
        self.branches
            .iter()
            .fold(BTreeMap::new(), |mut acc, (name, position)| {
                if let Some(position) = position {
                    acc.entry(*position).or_insert_with(Vec::new).push(name);
                }
                acc
            })
    }
}
