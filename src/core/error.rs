//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`SwitcherError`] which covers every failure mode of the
//! switcher: environment problems, invalid input, unmet preconditions, failed git
//! calls and archive failures. It uses `thiserror` for ergonomic error definitions
//! and includes constructors for the variants built in more than one place.
//!
//! # Public API
//! - [`SwitcherError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, SwitcherError>`
//!
//! # Error Categories
//! - **Environment**: git executable missing, directory is not a repository
//! - **Invalid input**: unknown state names
//! - **Preconditions**: branches that must exist before an operation
//! - **Git operations**: a checkout, commit, reset or delete that failed mid-sequence
//! - **Archive**: the output artifact could not be written

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for codebase-switcher
#[derive(Error, Debug)]
pub enum SwitcherError {
    // Environment errors
    #[error("Git not found in PATH.")]
    GitNotFound,

    #[error("Not a git repo. Run --init first.")]
    NotInGitRepo,

    // Invalid input
    #[error("Invalid state '{name}'. Available: preedit, beetle, sonnet, rewrite")]
    InvalidState { name: String },

    // Precondition errors
    #[error("State '{state}' doesn't exist. Run --init first.")]
    StateNotInitialized { state: String },

    #[error("Base branch '{branch}' doesn't exist. Run --init first.")]
    BaseBranchMissing { branch: String },

    #[error("Need at least 2 branches for comparison. Found: {found}\n   Complete work on model branches first.")]
    NotEnoughBranches { found: String },

    // Git operation errors
    #[error("git {command} failed: {message}")]
    GitCommand { command: String, message: String },

    #[error("Failed to switch to {branch}: {reason}")]
    SwitchFailed { branch: String, reason: String },

    #[error("Failed to create {branch} branch: {reason}")]
    BranchCreateFailed { branch: String, reason: String },

    #[error("Failed to create initial commit: {reason}")]
    InitialCommitFailed { reason: String },

    #[error("Could not copy {source_branch} content to {target}: {reason}")]
    ResetFailed {
        source_branch: String,
        target: String,
        reason: String,
    },

    #[error("Still on switcher branch {branch}, cleanup aborted")]
    StillOnTransientBranch { branch: String },

    #[error("Failed to delete branches: {remaining}\n   You may need to manually clean up remaining branches")]
    CleanupIncomplete { remaining: String },

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    // Archive errors
    #[error("Error creating zip {path}: {message}")]
    ArchiveFailed { path: PathBuf, message: String },

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // Configuration errors
    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using SwitcherError
pub type Result<T> = std::result::Result<T, SwitcherError>;

impl SwitcherError {
    /// Create a failed git command error
    pub fn git_command(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GitCommand {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a switch failed error
    pub fn switch_failed(branch: impl Into<String>, reason: impl ToString) -> Self {
        Self::SwitchFailed {
            branch: branch.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a branch creation failed error
    pub fn branch_create_failed(branch: impl Into<String>, reason: impl ToString) -> Self {
        Self::BranchCreateFailed {
            branch: branch.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an archive failed error
    pub fn archive_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ArchiveFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a not enough branches error from the branches that were found
    pub fn not_enough_branches(found: &[String]) -> Self {
        let found = if found.is_empty() {
            "none".to_string()
        } else {
            found.join(", ")
        };
        Self::NotEnoughBranches { found }
    }
}
