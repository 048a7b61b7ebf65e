//! Git repository operations behind the [`Gateway`] trait.
//!
//! The switcher never touches repository storage itself: every checkout, commit and
//! branch deletion is delegated to a [`Gateway`]. [`GitRepo`] is the production
//! implementation. Mutations and text queries run the `git` executable in the working
//! directory, structural queries (branch existence, current branch, tree comparison)
//! read the repository through `git2`.
//!
//! # Public API
//! - [`Gateway`]: Collaborator contract used by the state machine
//! - [`GitRepo`]: `git` CLI + `git2` backed gateway
//!
//! # Conventions
//! - **Mutations** take `&mut self` and return `Result<()>`; the error names the failing command
//! - **Text queries** return `Option<String>`, absent when the command failed
//! - **Boolean queries** never fail; an unreadable repository answers `false`

use crate::core::error::{Result, SwitcherError};
use git2::{BranchType, Repository};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Version-control operations the switcher relies on
pub trait Gateway {
    /// Working directory all operations run in
    fn workdir(&self) -> &Path;

    fn is_available(&self) -> bool;
    fn is_repository(&self) -> bool;

    // Mutations
    fn init(&mut self) -> Result<()>;
    fn configure_identity(&mut self, name: &str, email: &str) -> Result<()>;
    fn checkout(&mut self, branch: &str) -> Result<()>;
    /// Create `branch` at the current commit and check it out
    fn create_branch(&mut self, branch: &str) -> Result<()>;
    fn stage_all(&mut self) -> Result<()>;
    fn commit(&mut self, message: &str) -> Result<()>;
    fn reset_hard(&mut self, target: &str) -> Result<()>;
    fn delete_branch(&mut self, branch: &str) -> Result<()>;
    fn garbage_collect(&mut self) -> Result<()>;

    // Queries
    fn branch_exists(&self, branch: &str) -> bool;
    /// Name of the checked out branch, `None` for a detached HEAD
    fn current_branch(&self) -> Option<String>;
    fn has_commits(&self) -> bool;
    /// Porcelain-style dirty check, untracked files included
    fn has_changes(&self) -> bool;
    fn short_status(&self) -> Option<String>;
    fn recent_log(&self, count: usize) -> Option<String>;
    /// Whether the trees at the tips of `a` and `b` differ
    fn branches_differ(&self, a: &str, b: &str) -> Result<bool>;
}

pub struct GitRepo {
    workdir: PathBuf,
}

impl GitRepo {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        GitRepo {
            workdir: workdir.into(),
        }
    }

    fn repository(&self) -> Result<Repository> {
        Ok(Repository::open(&self.workdir)?)
    }

    /// Execute a git command in the working directory
    fn execute_git_command(&self, args: &[&str]) -> Result<()> {
        let command = args.join(" ");
        log::debug!("Running git {command}");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            log::debug!("git {command} exited with {}", output.status);
            return Err(SwitcherError::git_command(command, error_msg.trim()));
        }

        Ok(())
    }

    /// Execute a git command and capture its trimmed stdout
    fn capture_git_output(&self, args: &[&str]) -> Option<String> {
        log::debug!("Capturing git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Gateway for GitRepo {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn is_available(&self) -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn is_repository(&self) -> bool {
        self.workdir.join(".git").exists()
    }

    fn init(&mut self) -> Result<()> {
        self.execute_git_command(&["init"])
    }

    fn configure_identity(&mut self, name: &str, email: &str) -> Result<()> {
        self.execute_git_command(&["config", "--local", "user.name", name])?;
        self.execute_git_command(&["config", "--local", "user.email", email])
    }

    fn checkout(&mut self, branch: &str) -> Result<()> {
        self.execute_git_command(&["checkout", branch])
    }

    fn create_branch(&mut self, branch: &str) -> Result<()> {
        self.execute_git_command(&["checkout", "-b", branch])
    }

    fn stage_all(&mut self) -> Result<()> {
        self.execute_git_command(&["add", "."])
    }

    fn commit(&mut self, message: &str) -> Result<()> {
        self.execute_git_command(&["commit", "-m", message])
    }

    fn reset_hard(&mut self, target: &str) -> Result<()> {
        self.execute_git_command(&["reset", "--hard", target])
    }

    fn delete_branch(&mut self, branch: &str) -> Result<()> {
        self.execute_git_command(&["branch", "-D", branch])
    }

    fn garbage_collect(&mut self) -> Result<()> {
        self.execute_git_command(&["gc", "--prune=now"])
    }

    fn branch_exists(&self, branch: &str) -> bool {
        match self.repository() {
            Ok(repo) => repo.find_branch(branch, BranchType::Local).is_ok(),
            Err(_) => false,
        }
    }

    fn current_branch(&self) -> Option<String> {
        let repo = self.repository().ok()?;

        let branch = match repo.head() {
            Ok(head) if head.is_branch() => head.shorthand().map(str::to_string),
            Ok(_) => None,
            Err(_) => {
                // Unborn HEAD still names the branch the first commit will land on
                let head = repo.find_reference("HEAD").ok()?;
                head.symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(str::to_string)
            }
        };
        branch
    }

    fn has_commits(&self) -> bool {
        match self.repository() {
            Ok(repo) => repo.head().ok().and_then(|head| head.target()).is_some(),
            Err(_) => false,
        }
    }

    fn has_changes(&self) -> bool {
        self.capture_git_output(&["status", "--porcelain"])
            .is_some_and(|output| !output.is_empty())
    }

    fn short_status(&self) -> Option<String> {
        self.capture_git_output(&["status", "--short"])
    }

    fn recent_log(&self, count: usize) -> Option<String> {
        let limit = format!("-{count}");
        self.capture_git_output(&["log", "--oneline", &limit])
    }

    fn branches_differ(&self, a: &str, b: &str) -> Result<bool> {
        let repo = self.repository()?;
        let tree_a = repo
            .find_branch(a, BranchType::Local)?
            .get()
            .peel_to_tree()?;
        let tree_b = repo
            .find_branch(b, BranchType::Local)?
            .get()
            .peel_to_tree()?;

        let diff = repo.diff_tree_to_tree(Some(&tree_a), Some(&tree_b), None)?;
        Ok(diff.deltas().len() > 0)
    }
}
