//! Package the comparison and tear down the switcher branches.
//!
//! The sequence is: commit pending work, check that at least two comparison
//! branches exist, archive the preedit tree, move the chosen branch's content onto
//! a safe long-lived branch, then force-delete all four state branches. The archive
//! is never rolled back once written, even when cleanup fails afterwards.

use crate::core::{
    archive::{ArchiveBuilder, ArchiveSummary},
    error::{Result, SwitcherError},
    git::Gateway,
    print_info, print_section_header, print_step, print_success, print_warning,
    should_exclude,
    state::State,
    switcher::Switcher,
};
use chrono::{DateTime, Local};
use std::path::Path;

/// Long-lived branches that survive cleanup, in order of preference
pub const SAFE_BRANCHES: [&str; 2] = ["main", "master"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipOutcome {
    pub archive: ArchiveSummary,
    /// State whose content the safe branch now holds
    pub kept: State,
    pub safe_branch: String,
}

pub fn execute_zip<G: Gateway>(switcher: &mut Switcher<G>, keep: Option<State>) -> Result<ZipOutcome> {
    switcher.validate_git()?;

    let current = switcher.current_branch();
    if switcher.has_changes() {
        switcher.auto_commit(&format!(" - final {current} work"))?;
    }

    verify_branches_different(switcher)?;

    print_step("Switching to preedit baseline for zip creation...");
    switcher.switch_branch(State::Preedit.branch_name())?;

    let workdir = switcher.gateway().workdir().to_path_buf();
    let archive_name = archive_file_name(&workdir, &switcher.config().archive_prefix, Local::now());
    let archive_path = workdir.join(&archive_name);

    print_step(&format!("Creating model comparison results: {archive_name}..."));
    let archive = ArchiveBuilder::new(&workdir)
        .build(&archive_path, |relative| should_exclude(relative, &archive_name))?;
    print_success(&format!(
        "Created {archive_name} ({:.1} KB)",
        archive.size_bytes as f64 / 1024.0
    ));
    print_info(&format!(
        "Contains: {} files from the preedit baseline",
        archive.files_written
    ));

    let kept = prepare_keep_branch(switcher, keep.unwrap_or(State::Preedit));

    print_section_header("Starting complete branch cleanup");
    let cleanup = cleanup_branches(switcher, kept);

    match &cleanup {
        Ok(_) => print_success(
            "Zip created and branches cleaned up successfully!\n  Project ready for fresh analysis or archival",
        ),
        Err(_) => print_warning("Zip created but branch cleanup had issues"),
    }
    print_info(&format!("Archive location: {}", archive_path.display()));
    print_info(&format!("Final codebase contains: {kept} branch content"));

    let safe_branch = cleanup?;
    Ok(ZipOutcome {
        archive,
        kept,
        safe_branch,
    })
}

/// `<prefix>_<directory-name>_<YYYYmmdd_HHMMSS>.zip`
pub fn archive_file_name(workdir: &Path, prefix: &str, timestamp: DateTime<Local>) -> String {
    let dir_name = workdir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());

    format!(
        "{prefix}_{dir_name}_{}.zip",
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Require two comparison branches and report which pairs differ
fn verify_branches_different<G: Gateway>(switcher: &mut Switcher<G>) -> Result<()> {
    print_step("Verifying model results are different...");

    let existing: Vec<String> = State::ACTIVE
        .iter()
        .filter(|state| switcher.branch_exists(state.branch_name()))
        .map(|state| state.to_string())
        .collect();

    if existing.len() < 2 {
        return Err(SwitcherError::not_enough_branches(&existing));
    }

    print_step(&format!("Comparing branches: {}", existing.join(", ")));

    let mut all_same = true;
    for (i, left) in existing.iter().enumerate() {
        for right in &existing[i + 1..] {
            if switcher.gateway().branches_differ(left, right)? {
                all_same = false;
                print_success(&format!("{left} and {right} branches are different"));
            } else {
                print_warning(&format!("{left} and {right} branches are identical"));
            }
        }
    }

    if all_same {
        print_warning("All branches are identical - this suggests similar responses");
        print_info("  This is still valid comparison data");
    } else {
        print_success("Model/rewrite responses show differences - good comparison data");
    }
    Ok(())
}

/// Check out the branch whose content should survive cleanup
fn prepare_keep_branch<G: Gateway>(switcher: &mut Switcher<G>, requested: State) -> State {
    if requested == State::Preedit {
        return State::Preedit;
    }

    if !switcher.branch_exists(requested.branch_name()) {
        print_warning(&format!("Branch '{requested}' not found, keeping preedit"));
        return State::Preedit;
    }

    print_step(&format!(
        "Preparing {requested} branch content as final codebase..."
    ));
    match switcher.switch_branch(requested.branch_name()) {
        Ok(()) => requested,
        Err(e) => {
            log::warn!("Keep branch checkout failed: {e}");
            print_warning(&format!("Could not switch to {requested}, keeping preedit"));
            State::Preedit
        }
    }
}

/// Move `keep`'s content onto a safe branch and delete every state branch
fn cleanup_branches<G: Gateway>(switcher: &mut Switcher<G>, keep: State) -> Result<String> {
    print_step("Cleaning up switcher branches...");

    let existing_safe = SAFE_BRANCHES
        .iter()
        .find(|branch| switcher.branch_exists(branch))
        .map(|branch| branch.to_string());
    let current = switcher.current_branch();

    let safe_branch = match existing_safe {
        None => {
            // Created at the current pointer, which already holds the kept content
            let safe_branch = SAFE_BRANCHES[0];
            print_step(&format!("Creating {safe_branch} branch as safe branch..."));
            switcher.create_branch(safe_branch)?;
            safe_branch.to_string()
        }
        Some(safe_branch) if current == keep.branch_name() => {
            print_step(&format!("Copying {keep} content to {safe_branch} branch..."));
            switcher.switch_branch(&safe_branch)?;
            switcher
                .gateway_mut()
                .reset_hard(keep.branch_name())
                .map_err(|e| SwitcherError::ResetFailed {
                    source_branch: keep.to_string(),
                    target: safe_branch.clone(),
                    reason: e.to_string(),
                })?;
            safe_branch
        }
        Some(safe_branch) => {
            if current != safe_branch {
                print_step(&format!("Switching to {safe_branch} branch..."));
                switcher.switch_branch(&safe_branch)?;
            }
            safe_branch
        }
    };

    let now_on = switcher.current_branch();
    if State::from_branch(&now_on).is_some() {
        return Err(SwitcherError::StillOnTransientBranch { branch: now_on });
    }

    for state in State::ALL {
        let branch = state.branch_name();
        if !switcher.branch_exists(branch) {
            continue;
        }

        print_step(&format!("Force deleting {branch} branch..."));
        match switcher.gateway_mut().delete_branch(branch) {
            Ok(()) => print_success(&format!("Successfully deleted {branch} branch")),
            Err(e) => {
                log::warn!("Deleting {branch} failed: {e}");
                print_warning(&format!("Failed to delete {branch} branch"));
            }
        }
    }

    let remaining: Vec<&str> = State::ALL
        .iter()
        .map(|state| state.branch_name())
        .filter(|branch| switcher.branch_exists(branch))
        .collect();
    if !remaining.is_empty() {
        return Err(SwitcherError::CleanupIncomplete {
            remaining: remaining.join(", "),
        });
    }

    print_step("Cleaning up branch references...");
    if let Err(e) = switcher.gateway_mut().garbage_collect() {
        log::warn!("Garbage collection failed: {e}");
    }

    print_success("Cleanup complete - all switcher branches removed");
    print_info(&format!(
        "Now on {safe_branch} branch with model comparison results"
    ));
    Ok(safe_branch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::SwitcherConfig, fake_gateway::FakeGateway};
    use chrono::TimeZone;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn project_with_files() -> Result<TempDir> {
        let temp_dir = TempDir::new()?;
        std::fs::write(temp_dir.path().join("README.md"), "readme")?;
        std::fs::create_dir_all(temp_dir.path().join("node_modules/pkg"))?;
        std::fs::write(temp_dir.path().join("node_modules/pkg/index.js"), "x")?;
        Ok(temp_dir)
    }

    fn zip_files_in(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "zip"))
            .collect()
    }

    #[test]
    fn test_archive_file_name() {
        let timestamp = Local.with_ymd_and_hms(2025, 6, 30, 18, 0, 5).unwrap();
        let name = archive_file_name(Path::new("/work/my-app"), "model_comparison", timestamp);
        assert_eq!(name, "model_comparison_my-app_20250630_180005.zip");
    }

    #[test]
    fn test_fewer_than_two_branches_fails_before_archive() -> Result<()> {
        let temp_dir = project_with_files()?;
        let mut gateway = FakeGateway::initialized().with_workdir(temp_dir.path());
        gateway.branches.remove("sonnet");
        let mut switcher = Switcher::new(gateway, SwitcherConfig::default());

        let err = execute_zip(&mut switcher, None).unwrap_err();
        assert!(matches!(err, SwitcherError::NotEnoughBranches { .. }));
        assert!(zip_files_in(temp_dir.path()).is_empty());
        assert!(!switcher
            .gateway()
            .mutations
            .iter()
            .any(|m| m.starts_with("branch -D")));
        Ok(())
    }

    #[test]
    fn test_zip_keeps_chosen_branch_and_deletes_states() -> Result<()> {
        let temp_dir = project_with_files()?;
        let mut gateway = FakeGateway::initialized().with_workdir(temp_dir.path());
        gateway.head = "sonnet".to_string();
        gateway.dirty = true;
        gateway
            .branches
            .get_mut("beetle")
            .unwrap()
            .push("Beetle answer".to_string());
        let mut switcher = Switcher::new(gateway, SwitcherConfig::default());

        let outcome = execute_zip(&mut switcher, Some(State::Beetle))?;

        assert_eq!(outcome.kept, State::Beetle);
        assert_eq!(outcome.safe_branch, "master");
        assert_eq!(outcome.archive.files_written, 1);
        assert!(outcome.archive.path.exists());

        let gateway = switcher.gateway();
        assert_eq!(gateway.branch_names(), vec!["master"]);
        assert_eq!(gateway.head, "master");
        assert_eq!(
            gateway.commits("master"),
            vec!["Initial commit", "Beetle answer"]
        );
        Ok(())
    }

    #[test]
    fn test_zip_final_work_is_committed_first() -> Result<()> {
        let temp_dir = project_with_files()?;
        let mut gateway = FakeGateway::initialized().with_workdir(temp_dir.path());
        gateway.head = "sonnet".to_string();
        gateway.dirty = true;
        let mut switcher = Switcher::new(gateway, SwitcherConfig::default());

        execute_zip(&mut switcher, None)?;

        assert_eq!(
            switcher.gateway().mutations[1],
            "commit Auto-commit on sonnet - final sonnet work"
        );
        Ok(())
    }

    #[test]
    fn test_zip_creates_main_when_no_safe_branch() -> Result<()> {
        let temp_dir = project_with_files()?;
        let mut gateway = FakeGateway::initialized().with_workdir(temp_dir.path());
        gateway.branches.remove("master");
        let mut switcher = Switcher::new(gateway, SwitcherConfig::default());

        let outcome = execute_zip(&mut switcher, None)?;

        assert_eq!(outcome.safe_branch, "main");
        assert_eq!(switcher.gateway().branch_names(), vec!["main"]);
        Ok(())
    }

    #[test]
    fn test_missing_keep_branch_falls_back_to_preedit() -> Result<()> {
        let temp_dir = project_with_files()?;
        let gateway = FakeGateway::initialized().with_workdir(temp_dir.path());
        let mut switcher = Switcher::new(gateway, SwitcherConfig::default());

        let outcome = execute_zip(&mut switcher, Some(State::Rewrite))?;
        assert_eq!(outcome.kept, State::Preedit);
        Ok(())
    }

    #[test]
    fn test_failed_reset_keeps_every_branch() -> Result<()> {
        let temp_dir = project_with_files()?;
        let mut gateway = FakeGateway::initialized().with_workdir(temp_dir.path());
        gateway
            .branches
            .get_mut("beetle")
            .unwrap()
            .push("Beetle answer".to_string());
        gateway.fail_on = Some("reset --hard");
        let mut switcher = Switcher::new(gateway, SwitcherConfig::default());

        let err = execute_zip(&mut switcher, Some(State::Beetle)).unwrap_err();

        assert!(matches!(
            &err,
            SwitcherError::ResetFailed { source_branch, target, .. }
                if source_branch == "beetle" && target == "master"
        ));
        let gateway = switcher.gateway();
        assert_eq!(
            gateway.branch_names(),
            vec!["beetle", "master", "preedit", "sonnet"]
        );
        assert!(!gateway.mutations.iter().any(|m| m.starts_with("branch -D")));
        assert_eq!(zip_files_in(temp_dir.path()).len(), 1);
        Ok(())
    }

    #[test]
    fn test_cleanup_refuses_to_run_from_state_branch() -> Result<()> {
        let temp_dir = project_with_files()?;
        let mut gateway = FakeGateway::initialized().with_workdir(temp_dir.path());
        gateway.stuck_head = true;
        let mut switcher = Switcher::new(gateway, SwitcherConfig::default());

        let err = execute_zip(&mut switcher, None).unwrap_err();

        assert!(matches!(
            &err,
            SwitcherError::StillOnTransientBranch { branch } if branch == "preedit"
        ));
        assert!(!switcher
            .gateway()
            .mutations
            .iter()
            .any(|m| m.starts_with("branch -D")));
        assert_eq!(switcher.gateway().branch_names().len(), 4);
        Ok(())
    }

    #[test]
    fn test_failed_delete_reports_cleanup_incomplete() -> Result<()> {
        let temp_dir = project_with_files()?;
        let mut gateway = FakeGateway::initialized().with_workdir(temp_dir.path());
        gateway.fail_on = Some("branch -D sonnet");
        let mut switcher = Switcher::new(gateway, SwitcherConfig::default());

        let err = execute_zip(&mut switcher, None).unwrap_err();
        assert!(matches!(err, SwitcherError::CleanupIncomplete { .. }));
        assert!(err.to_string().contains("sonnet"));
        assert_eq!(zip_files_in(temp_dir.path()).len(), 1);
        Ok(())
    }
}
