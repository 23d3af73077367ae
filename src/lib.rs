//! jit: a minimal version control engine
//!
//! A repository tracks files through a staging index, records snapshots in a
//! single commit log shared by every branch, and reconciles branches with a
//! two-way merge that marks conflicting files for manual resolution.
//!
//! - `areas`: repository state and storage (index, log, refs, blobs, workspace)
//! - `artifacts`: value types and algorithms (digests, snapshots, merge planning)
//! - `commands`: the operations exposed on [`Repository`]
//! - `errors`: [`RepositoryError`] and the crate `Result`

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::repository::Repository;
pub use commands::porcelain::add::StageReport;
pub use errors::{RepositoryError, Result};
