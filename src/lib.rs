//! Codebase Switcher - compare model outputs against a baseline using git branches.
//!
//! Each comparison state lives on its own branch (`preedit`, `beetle`, `sonnet`,
//! `rewrite`). Switching between states auto-commits pending model work, and the
//! final zip step archives the baseline tree and removes every switcher branch.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The [`Gateway`] contract and its git-backed [`GitRepo`]
//! - The [`Switcher`] state machine primitives and [`State`] enum
//! - Archive building and exclusion tables
//! - Error handling and result types
//! - Configuration and UI templates

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Archive
    ArchiveBuilder,
    ArchiveSummary,
    // Git operations
    Gateway,
    GitRepo,
    // Branch states
    State,
    // Error handling
    Result,
    SwitcherError,
    // Configuration
    SwitcherConfig,
    // State machine
    Switcher,
    // UI and formatting
    TemplateContext,
    Templates,
    TEMPLATES,
};
