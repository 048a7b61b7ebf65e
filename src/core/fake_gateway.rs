//! In-memory [`Gateway`] for state machine tests.
//!
//! Branches are modelled as commit-message lists; two branches "differ" when their
//! lists differ. Every mutation is recorded in `mutations` before it is applied, so
//! tests can assert both on the resulting repository and on what was attempted.

use crate::core::error::{Result, SwitcherError};
use crate::core::git::Gateway;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub struct FakeGateway {
    pub workdir: PathBuf,
    pub available: bool,
    pub repository: bool,
    pub branches: BTreeMap<String, Vec<String>>,
    pub head: String,
    pub dirty: bool,
    pub mutations: Vec<String>,
    /// Mutations starting with this text fail after being recorded
    pub fail_on: Option<&'static str>,
    /// Checkouts report success but leave HEAD where it was
    pub stuck_head: bool,
}

impl FakeGateway {
    /// A directory with git available but no repository
    pub fn empty() -> Self {
        FakeGateway {
            workdir: PathBuf::from("."),
            available: true,
            repository: false,
            branches: BTreeMap::new(),
            head: "master".to_string(),
            dirty: false,
            mutations: Vec::new(),
            fail_on: None,
            stuck_head: false,
        }
    }

    /// A repository right after initialization, sitting on preedit
    pub fn initialized() -> Self {
        let mut gateway = Self::empty();
        gateway.repository = true;
        for branch in ["master", "preedit", "beetle", "sonnet"] {
            gateway
                .branches
                .insert(branch.to_string(), vec!["Initial commit".to_string()]);
        }
        gateway.head = "preedit".to_string();
        gateway
    }

    pub fn with_workdir(mut self, workdir: &Path) -> Self {
        self.workdir = workdir.to_path_buf();
        self
    }

    pub fn commits(&self, branch: &str) -> Vec<String> {
        self.branches.get(branch).cloned().unwrap_or_default()
    }

    pub fn branch_names(&self) -> Vec<String> {
        self.branches.keys().cloned().collect()
    }

    fn record(&mut self, operation: String) -> Result<()> {
        self.mutations.push(operation.clone());
        match self.fail_on {
            Some(prefix) if operation.starts_with(prefix) => {
                Err(SwitcherError::git_command(operation, "simulated failure"))
            }
            _ => Ok(()),
        }
    }
}

impl Gateway for FakeGateway {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn is_repository(&self) -> bool {
        self.repository
    }

    fn init(&mut self) -> Result<()> {
        self.record("init".to_string())?;
        self.repository = true;
        self.head = "master".to_string();
        Ok(())
    }

    fn configure_identity(&mut self, name: &str, email: &str) -> Result<()> {
        self.record(format!("config {name} <{email}>"))
    }

    fn checkout(&mut self, branch: &str) -> Result<()> {
        self.record(format!("checkout {branch}"))?;
        if !self.branches.contains_key(branch) {
            return Err(SwitcherError::git_command(
                format!("checkout {branch}"),
                "pathspec did not match",
            ));
        }
        if !self.stuck_head {
            self.head = branch.to_string();
        }
        Ok(())
    }

    fn create_branch(&mut self, branch: &str) -> Result<()> {
        self.record(format!("checkout -b {branch}"))?;
        if self.branches.contains_key(branch) {
            return Err(SwitcherError::git_command(
                format!("checkout -b {branch}"),
                "branch already exists",
            ));
        }
        let commits = self.commits(&self.head);
        self.branches.insert(branch.to_string(), commits);
        self.head = branch.to_string();
        Ok(())
    }

    fn stage_all(&mut self) -> Result<()> {
        self.record("add .".to_string())
    }

    fn commit(&mut self, message: &str) -> Result<()> {
        self.record(format!("commit {message}"))?;
        if !self.dirty {
            return Err(SwitcherError::git_command("commit", "nothing to commit"));
        }
        self.branches
            .entry(self.head.clone())
            .or_default()
            .push(message.to_string());
        self.dirty = false;
        Ok(())
    }

    fn reset_hard(&mut self, target: &str) -> Result<()> {
        self.record(format!("reset --hard {target}"))?;
        let commits = self
            .branches
            .get(target)
            .cloned()
            .ok_or_else(|| SwitcherError::git_command("reset", "unknown revision"))?;
        self.branches.insert(self.head.clone(), commits);
        self.dirty = false;
        Ok(())
    }

    fn delete_branch(&mut self, branch: &str) -> Result<()> {
        self.record(format!("branch -D {branch}"))?;
        if branch == self.head {
            return Err(SwitcherError::git_command(
                format!("branch -D {branch}"),
                "cannot delete the branch you are on",
            ));
        }
        self.branches
            .remove(branch)
            .map(|_| ())
            .ok_or_else(|| SwitcherError::git_command("branch -D", "branch not found"))
    }

    fn garbage_collect(&mut self) -> Result<()> {
        self.record("gc --prune=now".to_string())
    }

    fn branch_exists(&self, branch: &str) -> bool {
        self.branches.contains_key(branch)
    }

    fn current_branch(&self) -> Option<String> {
        self.repository.then(|| self.head.clone())
    }

    fn has_commits(&self) -> bool {
        self.branches
            .get(&self.head)
            .is_some_and(|commits| !commits.is_empty())
    }

    fn has_changes(&self) -> bool {
        self.dirty
    }

    fn short_status(&self) -> Option<String> {
        Some(if self.dirty { " M file.txt" } else { "" }.to_string())
    }

    fn recent_log(&self, count: usize) -> Option<String> {
        let commits = self.branches.get(&self.head)?;
        Some(
            commits
                .iter()
                .rev()
                .take(count)
                .cloned()
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    fn branches_differ(&self, a: &str, b: &str) -> Result<bool> {
        match (self.branches.get(a), self.branches.get(b)) {
            (Some(left), Some(right)) => Ok(left != right),
            _ => Err(SwitcherError::git_command("diff", "unknown branch")),
        }
    }
}
