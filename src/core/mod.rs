//! Core functionality for the codebase-switcher tool.
//!
//! This module provides the building blocks the commands are made of: the
//! version-control gateway, the branch state machine primitives, the archive
//! builder, exclusion tables, configuration and output formatting.

pub mod archive;
pub mod config;
pub mod dirs;
pub mod error;
#[cfg(test)]
pub(crate) mod fake_gateway;
pub mod git;
pub mod output;
pub mod patterns;
pub mod state;
pub mod switcher;
pub mod templates;

// === Error handling ===
pub use error::{Result, SwitcherError};

// === Git operations ===
// Collaborator contract and its git-backed implementation
pub use git::{Gateway, GitRepo};

// === Branch states ===
pub use state::State;

// === State machine ===
pub use switcher::{Switcher, DETACHED_HEAD};

// === Configuration ===
pub use config::SwitcherConfig;

// === Archive ===
pub use archive::{ArchiveBuilder, ArchiveSummary};

// === Exclusion tables ===
pub use patterns::{
    gitignore_patterns, gitignore_section, merge_gitignore, should_exclude, GitignoreMerge,
    GITIGNORE_SENTINEL,
};

// === UI templates ===
pub use templates::{
    render_template, render_template_plain, strip_ansi_codes, TemplateContext, Templates, TEMPLATES,
};

// === Output formatting ===
pub use output::{
    print_error, print_info, print_section_header, print_step, print_success, print_warning,
};
