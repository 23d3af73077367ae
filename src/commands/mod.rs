//! Command implementations
//!
//! - `plumbing`: Low-level commands over the object store (hash-object, cat-file, show)
//! - `porcelain`: User-facing version control workflows (add, commit, merge, etc.)
//!
//! Every command is an `impl Repository` block, so the binary only has to
//! build a repository and call the matching method.

pub mod plumbing;
pub mod porcelain;
