//! Common assertion helpers for test output validation

#![allow(dead_code)]

use predicates::prelude::*;

pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not a git repo. Run --init first.")
}

pub fn not_initialized(state: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("State '{state}' doesn't exist. Run --init first."))
}

pub fn now_on(state: &str) -> impl Predicate<str> {
    predicates::str::contains("Switching from")
        .and(predicates::str::contains(format!("to {state} branch...")))
}

pub fn not_enough_branches() -> impl Predicate<str> {
    predicates::str::contains("Need at least 2 branches for comparison")
}
