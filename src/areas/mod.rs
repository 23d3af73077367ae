//! Core repository components
//!
//! - `database`: Digest-keyed blob store for file contents
//! - `index`: Staging area tracking what the next commit records
//! - `commit_log`: Append-only commit sequence shared by all branches
//! - `refs`: Branch table and HEAD
//! - `state`: Atomic persistence of index, log and refs as one unit
//! - `repository`: Entry point tying the areas together
//! - `workspace`: Working directory file system operations

pub mod commit_log;
pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod state;
pub mod workspace;
