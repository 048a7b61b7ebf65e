use crate::core::{
    error::{Result, SwitcherError},
    git::Gateway,
    merge_gitignore, print_step, print_success, print_warning,
    state::State,
    switcher::Switcher,
    GitignoreMerge,
};
use std::fs;
use std::path::Path;

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit - baseline for model comparison";

/// Heading of the branch list the bootstrap README carries
pub const README_BRANCHES_HEADING: &str = "## Model comparison branches";

/// Set up the baseline and both model branches.
///
/// Safe to rerun: existing repository, commits and branches are reused, and the
/// ignore-file section is only ever added once. The rewrite branch is left to be
/// created on first use.
pub fn execute_init<G: Gateway>(switcher: &mut Switcher<G>) -> Result<()> {
    switcher.ensure_git_available()?;

    if !switcher.gateway().is_repository() {
        print_step("Initializing git repository...");
        switcher.gateway_mut().init()?;

        print_step("Setting up local git configuration...");
        let config = switcher.config().clone();
        switcher
            .gateway_mut()
            .configure_identity(&config.git_user, &config.git_email)?;
        switcher.clear_branch_cache();
    }

    if !switcher.gateway().has_commits() {
        print_step("Creating initial commit...");
        create_initial_files(switcher.gateway().workdir());

        let gateway = switcher.gateway_mut();
        gateway
            .stage_all()
            .and_then(|()| gateway.commit(INITIAL_COMMIT_MESSAGE))
            .map_err(|e| SwitcherError::InitialCommitFailed {
                reason: e.to_string(),
            })?;
    }

    switcher.auto_commit(" before branch setup")?;
    create_branches(switcher)?;

    print_success("Initialized model comparison environment");
    Ok(())
}

fn create_branches<G: Gateway>(switcher: &mut Switcher<G>) -> Result<()> {
    let baseline = State::Preedit.branch_name();

    if switcher.branch_exists(baseline) {
        switcher.switch_branch(baseline)?;
    } else {
        print_step(&format!("Creating {baseline} branch"));
        switcher.create_branch(baseline)?;
    }

    for state in [State::Beetle, State::Sonnet] {
        if !switcher.branch_exists(state.branch_name()) {
            print_step(&format!("Creating {state} branch from {baseline}"));
            switcher.create_branch(state.branch_name())?;
        }
        switcher.switch_branch(baseline)?;
    }

    Ok(())
}

/// Write the bootstrap README and ignore file; failures only warn
fn create_initial_files(workdir: &Path) {
    if let Err(e) = write_readme(workdir).and_then(|()| write_gitignore(workdir)) {
        log::warn!("Bootstrap file creation failed: {e}");
        print_warning(&format!("Could not create initial files: {e}"));
    }
}

fn write_readme(workdir: &Path) -> std::io::Result<()> {
    let readme_path = workdir.join("README.md");
    if !readme_path.exists() {
        return fs::write(&readme_path, readme_content());
    }

    let existing = fs::read_to_string(&readme_path)?;
    if existing.contains(README_BRANCHES_HEADING) {
        print_step("README.md already lists the comparison branches");
        return Ok(());
    }

    fs::write(
        &readme_path,
        format!("{}\n\n{}", existing.trim_end(), readme_branch_section()),
    )?;
    print_step("Added comparison branch list to existing README.md");
    Ok(())
}

pub fn readme_content() -> String {
    format!(
        "# Model Comparison Project\n\n\
         Project Date: {}\n\n\
         This project contains model comparison results.\n\n{}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        readme_branch_section()
    )
}

fn readme_branch_section() -> String {
    format!(
        "{README_BRANCHES_HEADING}\n\n\
         - `preedit` branch: Original baseline codebase\n\
         - `beetle` branch: Beetle model's response\n\
         - `sonnet` branch: Sonnet model's response\n\
         - `rewrite` branch: Rewritten codebase\n"
    )
}

fn write_gitignore(workdir: &Path) -> std::io::Result<()> {
    let gitignore_path = workdir.join(".gitignore");
    let existing = if gitignore_path.exists() {
        Some(fs::read_to_string(&gitignore_path)?)
    } else {
        None
    };

    match merge_gitignore(existing.as_deref()) {
        GitignoreMerge::Created(content) => {
            fs::write(&gitignore_path, content)?;
            print_step("Created .gitignore");
        }
        GitignoreMerge::Updated(content) => {
            fs::write(&gitignore_path, content)?;
            print_step("Updated existing .gitignore");
        }
        GitignoreMerge::Unchanged => print_step(".gitignore already contains switcher patterns"),
    }

    Ok(())
}
