//! Repository data structures and algorithms
//!
//! - `branch`: Branch name validation
//! - `core`: Shared utilities (pager wrapper)
//! - `ignore`: Ignore rules consulted while staging
//! - `merge`: Merge planning and conflict markers
//! - `objects`: Digests, blobs, snapshots and commits
//! - `state`: On-disk framing of the repository state file

pub mod branch;
pub mod core;
pub mod ignore;
pub mod merge;
pub mod objects;
pub mod state;
