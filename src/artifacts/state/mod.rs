//! Repository state file format
//!
//! The staging index, commit log, branch table and HEAD are persisted together
//! in `.jit/state`, so a single rename publishes all of them at once.
//!
//! ```text
//! Header (8 bytes):
//!   - Signature: "JITS" (4 bytes)
//!   - Version: 1 (4 bytes)
//!
//! Body:
//!   - Staging index snapshot
//!   - Commit count (4 bytes) + commits
//!   - Branch count (4 bytes) + branches (name, has-position flag, position)
//!   - HEAD branch name
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod state_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of state header in bytes
pub const HEADER_SIZE: usize = 8;

/// Magic signature identifying state files
pub const SIGNATURE: &str = "JITS";

/// State file format version
pub const VERSION: u32 = 1;
