//! Shared utilities for codebase-switcher integration tests
//!
//! Every test drives the real binary inside a temporary directory holding a real
//! git repository, with the user config directory redirected to an empty location.

pub mod assertions;
pub mod repository;
