//! Stored object types
//!
//! - **ContentDigest**: SHA-1 of raw file bytes, the change detector and blob key
//! - **Blob**: file content kept in the blob store
//! - **Snapshot**: path to digest mapping shared by the index and commits
//! - **Commit**: message, timestamp and snapshot appended to the commit log
//!
//! Everything persisted implements `Packable`/`Unpackable` with big-endian
//! length-prefixed fields.

pub mod blob;
pub mod commit;
pub mod content_digest;
pub mod object;
pub mod snapshot;

/// Length of a SHA-1 digest in hexadecimal format
pub const DIGEST_LENGTH: usize = 40;
