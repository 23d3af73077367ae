//! Path to digest mapping
//!
//! A snapshot is what a commit records and what the staging index holds:
//! every tracked path mapped to the digest of its content. Entries are kept
//! sorted by path so packing and iteration are deterministic.
//!
//! ## Format
//!
//! ```text
//! entry count (u32)
//! entries:
//!   path length (u32) + path bytes, `/` separated
//!   digest (20 bytes)
//! ```

use crate::artifacts::objects::content_digest::ContentDigest;
use crate::artifacts::objects::object::{Packable, Unpackable, read_path, write_path};
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: BTreeMap<PathBuf, ContentDigest>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<&ContentDigest> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Record a digest for a path, returning the digest it replaced
    pub fn insert(&mut self, path: PathBuf, digest: ContentDigest) -> Option<ContentDigest> {
        self.entries.insert(path, digest)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &ContentDigest)> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.keys()
    }
}

impl FromIterator<(PathBuf, ContentDigest)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (PathBuf, ContentDigest)>>(iter: T) -> Self {
        Snapshot {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Packable for Snapshot {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::new();
        bytes.write_u32::<NetworkEndian>(u32::try_from(self.entries.len())?)?;

        for (path, digest) in &self.entries {
            write_path(&mut bytes, path)?;
            digest.write_h40_to(&mut bytes)?;
        }

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for Snapshot {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let entries_count = reader.read_u32::<NetworkEndian>()?;
        let mut snapshot = Snapshot::new();

        for _ in 0..entries_count {
            let path = read_path(&mut reader)?;
            let digest = ContentDigest::read_h40_from(&mut reader)?;

            if snapshot.insert(path.clone(), digest).is_some() {
                anyhow::bail!("duplicate snapshot entry for {}", path.display());
            }
        }

        Ok(snapshot)
    }
}
