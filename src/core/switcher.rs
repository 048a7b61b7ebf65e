//! Branch state machine primitives.
//!
//! [`Switcher`] owns the [`Gateway`], the loaded configuration and the only mutable
//! state a run keeps: the cached current-branch name. Commands build their
//! sequences out of the primitives here, which guarantee that
//!
//! - the cached branch is invalidated after every successful checkout or branch creation
//! - pending changes are always read live from the gateway, never cached
//! - leaving an active state with pending work commits that work to the state being left
//! - leaving the baseline never forces a commit

use crate::core::config::SwitcherConfig;
use crate::core::error::{Result, SwitcherError};
use crate::core::git::Gateway;
use crate::core::output::print_step;
use crate::core::state::State;

/// Name reported for a HEAD that is not on a branch
pub const DETACHED_HEAD: &str = "HEAD";

pub struct Switcher<G: Gateway> {
    gateway: G,
    config: SwitcherConfig,
    current_branch_cache: Option<String>,
    git_available: Option<bool>,
}

impl<G: Gateway> Switcher<G> {
    pub fn new(gateway: G, config: SwitcherConfig) -> Self {
        Switcher {
            gateway,
            config,
            current_branch_cache: None,
            git_available: None,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    pub fn config(&self) -> &SwitcherConfig {
        &self.config
    }

    pub fn ensure_git_available(&mut self) -> Result<()> {
        let gateway = &self.gateway;
        let available = *self
            .git_available
            .get_or_insert_with(|| gateway.is_available());

        if available {
            Ok(())
        } else {
            Err(SwitcherError::GitNotFound)
        }
    }

    /// Require a usable git executable and an initialized repository
    pub fn validate_git(&mut self) -> Result<()> {
        self.ensure_git_available()?;
        if !self.gateway.is_repository() {
            return Err(SwitcherError::NotInGitRepo);
        }
        Ok(())
    }

    pub fn current_branch(&mut self) -> String {
        if let Some(branch) = &self.current_branch_cache {
            return branch.clone();
        }

        let branch = self
            .gateway
            .current_branch()
            .unwrap_or_else(|| DETACHED_HEAD.to_string());
        log::debug!("Current branch resolved to {branch}");
        self.current_branch_cache = Some(branch.clone());
        branch
    }

    pub fn clear_branch_cache(&mut self) {
        self.current_branch_cache = None;
    }

    pub fn has_changes(&self) -> bool {
        self.gateway.has_changes()
    }

    pub fn branch_exists(&self, branch: &str) -> bool {
        self.gateway.branch_exists(branch)
    }

    /// Commit every pending change on the current branch.
    ///
    /// Returns `false` without touching the repository when the tree is clean.
    pub fn auto_commit(&mut self, suffix: &str) -> Result<bool> {
        if !self.has_changes() {
            return Ok(false);
        }

        let current = self.current_branch();
        print_step(&format!("Auto-committing changes on {current}{suffix}"));
        self.gateway.stage_all()?;
        self.gateway
            .commit(&format!("Auto-commit on {current}{suffix}"))?;
        Ok(true)
    }

    /// Secure pending work on `current` before the branch pointer moves
    pub fn commit_before_switch(&mut self, current: &str) -> Result<()> {
        if !self.has_changes() {
            return Ok(());
        }

        match State::from_branch(current) {
            Some(state) if state.is_active() => {
                self.auto_commit(&model_work_suffix(state))?;
            }
            Some(_) => print_step("Switching from baseline (changes will be preserved)"),
            None => log::debug!("Leaving non-switcher branch {current} with pending changes"),
        }
        Ok(())
    }

    pub fn switch_branch(&mut self, target: &str) -> Result<()> {
        let current = self.current_branch();
        print_step(&format!("Switching from {current} to {target} branch..."));

        self.gateway
            .checkout(target)
            .map_err(|e| SwitcherError::switch_failed(target, e))?;
        self.clear_branch_cache();
        Ok(())
    }

    /// Create `branch` at the current commit and move onto it
    pub fn create_branch(&mut self, branch: &str) -> Result<()> {
        self.gateway
            .create_branch(branch)
            .map_err(|e| SwitcherError::branch_create_failed(branch, e))?;
        self.clear_branch_cache();
        Ok(())
    }
}

/// Commit label for work left behind on an active state
pub fn model_work_suffix(state: State) -> String {
    format!(" - {state} model work")
}
