//! Commit record
//!
//! A commit captures a message, the moment it was made and the snapshot of
//! every staged path. Commits carry no parent link: their place in history is
//! their position in the shared commit log.
//!
//! ## Format
//!
//! ```text
//! message length (u32) + message bytes
//! timestamp seconds (i64)
//! utc offset seconds (i32)
//! snapshot
//! ```

use crate::artifacts::objects::object::{Packable, Unpackable, read_text, write_text};
use crate::artifacts::objects::snapshot::Snapshot;
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SubsecRound, TimeZone};
use std::io::{BufRead, Write};

/// Environment variable pinning the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "JIT_COMMIT_DATE";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    message: String,
    snapshot: Snapshot,
    timestamp: DateTime<FixedOffset>,
}

impl Commit {
    /// Create a commit stamped with the current time, or with the time pinned
    /// through `JIT_COMMIT_DATE`
    ///
    /// The packed form keeps whole seconds, so the stamp is truncated to match.
    pub fn new(message: String, snapshot: Snapshot) -> Self {
        let timestamp = Self::load_timestamp_from_env()
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
            .trunc_subsecs(0);

        Commit {
            message,
            snapshot,
            timestamp,
        }
    }

    pub fn new_with_timestamp(
        message: String,
        snapshot: Snapshot,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Commit {
            message,
            snapshot,
            timestamp,
        }
    }

    /// Accepts RFC 2822 or `%Y-%m-%d %H:%M:%S %z`
    fn load_timestamp_from_env() -> Option<DateTime<FixedOffset>> {
        std::env::var(COMMIT_DATE_ENV).ok().and_then(|date_str| {
            DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::new();

        write_text(&mut bytes, &self.message)?;
        bytes.write_i64::<NetworkEndian>(self.timestamp.timestamp())?;
        bytes.write_i32::<NetworkEndian>(self.timestamp.offset().local_minus_utc())?;
        bytes.write_all(&self.snapshot.serialize()?)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let message = read_text(&mut reader)?;
        let seconds = reader.read_i64::<NetworkEndian>()?;
        let offset = reader.read_i32::<NetworkEndian>()?;

        let offset = FixedOffset::east_opt(offset)
            .ok_or_else(|| anyhow::anyhow!("Invalid timezone offset: {}", offset))?;
        let timestamp = offset
            .timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| anyhow::anyhow!("Invalid timestamp: {}", seconds))?;

        let snapshot = Snapshot::deserialize(&mut reader)?;

        Ok(Self::new_with_timestamp(message, snapshot, timestamp))
    }
}
