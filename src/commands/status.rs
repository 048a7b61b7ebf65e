use crate::core::{
    error::Result, git::Gateway, print_info, print_section_header, state::State,
    switcher::Switcher,
};
use colored::*;

const RECENT_COMMITS: usize = 3;

/// Read-only report of the current state and what will happen to pending work
pub fn execute_status<G: Gateway>(switcher: &mut Switcher<G>) -> Result<()> {
    switcher.validate_git()?;

    let current = switcher.current_branch();
    let has_changes = switcher.has_changes();

    print_info(&format!("Current branch: {}", current.blue()));
    let models: Vec<&str> = State::ACTIVE.iter().map(|s| s.branch_name()).collect();
    print_info(&format!("Available models: {}", models.join(", ")));

    match State::from_branch(&current) {
        Some(State::Preedit) => {
            print_info("On baseline branch (internal)");
            if has_changes {
                print_info("Baseline has changes (will be preserved when switching)");
            }
        }
        Some(state) => {
            let (work_type, work_desc) = match state {
                State::Rewrite => ("rewrite", "rewrite work"),
                _ => (state.title(), "model work"),
            };
            print_info(&format!("On {state} branch - working with {work_type}"));
            if has_changes {
                print_info(&format!(
                    "You have uncommitted {work_desc} (will auto-commit on switch)"
                ));
            }
        }
        None => print_info(&format!("On {current}, which is not a switcher branch")),
    }

    if !has_changes {
        print_info(&"All changes committed".green().to_string());
    }

    print_section_header("Git status");
    let status = switcher.gateway().short_status().filter(|s| !s.is_empty());
    print_info(status.as_deref().unwrap_or("No changes"));

    print_section_header("Recent commits");
    let log = switcher
        .gateway()
        .recent_log(RECENT_COMMITS)
        .filter(|s| !s.is_empty());
    print_info(log.as_deref().unwrap_or("No commits found"));

    Ok(())
}
