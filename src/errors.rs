//! Repository error types
//!
//! Every operation reports expected failures (missing files, unknown branches,
//! an empty stage, conflicted merges) through [`RepositoryError`] so callers can
//! react to them instead of the process going down.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// The thing an operation looked for and could not find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    Path(PathBuf),
    Commit { position: usize, len: usize },
    Branch(String),
    Blob(String),
}

impl std::fmt::Display for Missing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Missing::Path(path) => write!(f, "file {} does not exist", path.display()),
            Missing::Commit { position, len } => write!(
                f,
                "commit {} does not exist (log holds {} commits)",
                position, len
            ),
            Missing::Branch(name) => write!(f, "branch '{}' does not exist", name),
            Missing::Blob(digest) => write!(f, "no stored content for {}", digest),
        }
    }
}

/// The thing an operation would have created twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Existing {
    Branch(String),
    Repository(PathBuf),
}

impl std::fmt::Display for Existing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Existing::Branch(name) => write!(f, "a branch named '{}' already exists", name),
            Existing::Repository(path) => {
                write!(f, "repository already initialized at {}", path.display())
            }
        }
    }
}

/// Errors reported by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No repository state exists under the given root.
    #[error("not a jit repository: {0}")]
    NotInitialized(PathBuf),

    /// A path, commit position or branch is missing.
    #[error("{0}")]
    NotFound(Missing),

    /// A branch or repository already exists.
    #[error("{0}")]
    AlreadyExists(Existing),

    /// Commit attempted with nothing staged.
    #[error("nothing to commit, the staging index is empty")]
    EmptyStage,

    /// A branch was merged into itself.
    #[error("cannot merge branch '{0}' into itself")]
    SelfMerge(String),

    /// The merge left one or more paths with conflict markers.
    #[error(
        "merge of '{branch}' stopped with conflicts in: {}; fix them, add and commit",
        display_paths(.paths)
    )]
    Conflict { branch: String, paths: Vec<PathBuf> },

    #[error("invalid branch name: '{0}'")]
    InvalidBranchName(String),

    /// Persisted state or a stored blob failed verification.
    #[error("repository data is corrupted: {0}")]
    Corrupted(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(Missing::Path(path.into()))
    }

    pub fn branch_not_found(name: impl Into<String>) -> Self {
        Self::NotFound(Missing::Branch(name.into()))
    }

    pub fn corrupted(reason: impl Into<String>) -> Self {
        Self::Corrupted(reason.into())
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
