//! The four branch states of a model comparison.
//!
//! This module defines [`State`], the closed set of branches the switcher manages.
//! Every state maps to one git branch; `preedit` is the baseline and the other three
//! are active states that receive auto-commits when they are left with pending work.
//!
//! # Public API
//! - [`State`]: Baseline, the two model candidates, and the rewrite

use crate::core::error::SwitcherError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum State {
    /// Original baseline codebase
    Preedit,
    /// First model candidate
    Beetle,
    /// Second model candidate
    Sonnet,
    /// Rewritten codebase, created lazily from a base branch
    Rewrite,
}

impl State {
    pub const ALL: [State; 4] = [State::Preedit, State::Beetle, State::Sonnet, State::Rewrite];

    /// States that auto-commit pending work when left
    pub const ACTIVE: [State; 3] = [State::Beetle, State::Sonnet, State::Rewrite];

    pub fn branch_name(self) -> &'static str {
        match self {
            State::Preedit => "preedit",
            State::Beetle => "beetle",
            State::Sonnet => "sonnet",
            State::Rewrite => "rewrite",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            State::Preedit => "Preedit",
            State::Beetle => "Beetle",
            State::Sonnet => "Sonnet",
            State::Rewrite => "Rewrite",
        }
    }

    pub fn is_active(self) -> bool {
        !matches!(self, State::Preedit)
    }

    /// Map a git branch name back to its state, if it is one of ours
    pub fn from_branch(branch: &str) -> Option<State> {
        State::ALL
            .into_iter()
            .find(|state| state.branch_name() == branch)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.branch_name())
    }
}

impl FromStr for State {
    type Err = SwitcherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::from_branch(s).ok_or_else(|| SwitcherError::InvalidState {
            name: s.to_string(),
        })
    }
}
