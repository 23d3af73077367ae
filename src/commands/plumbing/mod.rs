//! Plumbing commands
//!
//! Low-level access to the object store and the commit log, mostly useful for
//! scripting and for checking what a porcelain command recorded.
//!
//! ## Commands
//!
//! - `hash-object`: Compute a file's digest and optionally store its content
//! - `cat-file`: Print the content stored under a digest
//! - `show`: Print a path's content as recorded by a commit

pub mod cat_file;
pub mod hash_object;
pub mod show;
