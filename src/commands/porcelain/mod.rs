//! Porcelain commands
//!
//! Each command loads the repository state, changes it and persists it back in
//! one step, reporting progress through the repository's writer.
//!
//! ## Commands
//!
//! - `init`: Create an empty repository with `main` checked out
//! - `add`: Stage files for the next commit
//! - `commit`: Record the staged snapshot on the current branch
//! - `log`: Show the commit log, most recent first
//! - `checkout`: Restore working files from a commit
//! - `branch`: Create or list branches
//! - `switch`: Move HEAD to another branch
//! - `merge`: Two-way merge of another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod switch;
