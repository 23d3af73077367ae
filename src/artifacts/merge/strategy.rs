//! Merge comparison strategies
//!
//! A strategy compares the snapshot of the current branch with the snapshot of
//! the branch being merged in and returns a [`MergePlan`]. Planning touches
//! neither the working directory nor the repository state, so the engine can
//! swap strategies without changing how commits and branches are updated.
//!
//! ## Two-way merge
//!
//! [`TwoWayMerge`] looks only at the two tip snapshots, with no common
//! ancestor:
//!
//! - path only on the source side: taken from the source
//! - path on both sides with the same digest: nothing to do
//! - path on both sides with different digests: conflict, current side kept
//!
//! A path deleted on the current branch but still tracked by the source is
//! therefore reintroduced.

use crate::artifacts::objects::content_digest::ContentDigest;
use crate::artifacts::objects::snapshot::Snapshot;
use std::path::PathBuf;

/// A path both sides changed to different content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub path: PathBuf,
    pub ours: ContentDigest,
    pub theirs: ContentDigest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    /// Snapshot the merge commit records when there are no conflicts
    pub merged: Snapshot,
    /// Paths introduced from the source side, sorted by path
    pub added: Vec<(PathBuf, ContentDigest)>,
    /// Conflicting paths, sorted by path
    pub conflicts: Vec<Conflict>,
}

impl MergePlan {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn conflict_paths(&self) -> Vec<PathBuf> {
        self.conflicts
            .iter()
            .map(|conflict| conflict.path.clone())
            .collect()
    }
}

pub trait MergeStrategy {
    fn name(&self) -> &'static str;

    fn plan(&self, current: &Snapshot, source: &Snapshot) -> MergePlan;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TwoWayMerge;

impl MergeStrategy for TwoWayMerge {
    fn name(&self) -> &'static str {
        "two-way"
    }

    fn plan(&self, current: &Snapshot, source: &Snapshot) -> MergePlan {
        let mut plan = MergePlan {
            merged: current.clone(),
            ..MergePlan::default()
        };

        for (path, theirs) in source.iter() {
            match current.get(path) {
                None => {
                    plan.merged.insert(path.clone(), theirs.clone());
                    plan.added.push((path.clone(), theirs.clone()));
                }
                Some(ours) if ours == theirs => {}
                Some(ours) => plan.conflicts.push(Conflict {
                    path: path.clone(),
                    ours: ours.clone(),
                    theirs: theirs.clone(),
                }),
            }
        }

        plan
    }
}
