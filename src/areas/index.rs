//! Staging index
//!
//! The index maps each staged path to the digest of the content it had when it
//! was added. It is what the next commit will record, and it is emptied by
//! every successful commit.

use crate::artifacts::objects::content_digest::ContentDigest;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::snapshot::Snapshot;
use bytes::Bytes;
use std::io::BufRead;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    entries: Snapshot,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&ContentDigest> {
        self.entries.get(path)
    }

    /// True when nothing is staged for `path` or the staged digest differs
    pub fn has_changes(&self, path: &Path, digest: &ContentDigest) -> bool {
        self.entries.get(path) != Some(digest)
    }

    /// Stage `digest` for `path`
    ///
    /// # Returns
    ///
    /// false if the same digest was already staged and nothing changed
    pub fn add(&mut self, path: PathBuf, digest: ContentDigest) -> bool {
        if !self.has_changes(&path, &digest) {
            return false;
        }

        self.entries.insert(path, digest);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&PathBuf, &ContentDigest)> {
        self.entries.iter()
    }

    /// Copy of the staged entries, as recorded by a commit
    pub fn snapshot(&self) -> Snapshot {
        self.entries.clone()
    }
}

impl Packable for Index {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        self.entries.serialize()
    }
}

impl Unpackable for Index {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        Ok(Index {
            entries: Snapshot::deserialize(reader)?,
        })
    }
}
