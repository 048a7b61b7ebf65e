//! Test repository setup and git inspection helpers

#![allow(dead_code)]

use assert_cmd::prelude::*;
use codebase_switcher::core::error::{Result, SwitcherError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A working directory plus an isolated config directory.
/// Both TempDirs must stay alive for the duration of the test.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub config_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The switcher binary, run inside this working directory
    pub fn switcher(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("codebase-switcher")
            .map_err(|e| SwitcherError::git_command("cargo_bin", e.to_string()))?;
        cmd.current_dir(&self.path)
            .env("XDG_CONFIG_HOME", self.config_dir.path())
            .env("NO_COLOR", "1");
        Ok(cmd)
    }

    /// Run the switcher with `args` and require success
    pub fn run(&self, args: &[&str]) -> Result<()> {
        self.switcher()?.args(args).assert().success();
        Ok(())
    }
}

/// An empty directory that is not yet a repository
pub fn setup_empty_dir() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let config_dir = TempDir::new()?;
    let path = temp_dir.path().to_path_buf();

    Ok(TestRepo {
        temp_dir,
        config_dir,
        path,
    })
}

/// A directory after `--init`: sitting on preedit with beetle and sonnet created
pub fn setup_initialized_repo() -> Result<TestRepo> {
    let repo = setup_empty_dir()?;
    repo.run(&["--init"])?;
    Ok(repo)
}

/// Initialized repo with different answers on beetle (committed) and sonnet (pending)
pub fn setup_repo_with_model_answers() -> Result<TestRepo> {
    let repo = setup_initialized_repo()?;

    repo.run(&["--beetle"])?;
    create_file(&repo.path, "answer.txt", "beetle answer\n")?;
    repo.run(&["--sonnet"])?;
    create_file(&repo.path, "answer.txt", "sonnet answer\n")?;

    Ok(repo)
}

pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(filename), content)?;
    Ok(())
}

pub fn read_file(repo_path: &Path, filename: &str) -> Result<String> {
    Ok(fs::read_to_string(repo_path.join(filename))?)
}

/// Run git and return its trimmed stdout
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()?;

    if !output.status.success() {
        return Err(SwitcherError::git_command(
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim(),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

pub fn current_branch(repo_path: &Path) -> Result<String> {
    git(repo_path, &["rev-parse", "--abbrev-ref", "HEAD"])
}

pub fn branches(repo_path: &Path) -> Result<Vec<String>> {
    let output = git(repo_path, &["branch", "--format=%(refname:short)"])?;
    Ok(output.lines().map(str::to_string).collect())
}

pub fn commit_count(repo_path: &Path, branch: &str) -> Result<usize> {
    let count = git(repo_path, &["rev-list", "--count", branch])?;
    count
        .parse()
        .map_err(|_| SwitcherError::git_command("rev-list", format!("bad count '{count}'")))
}

pub fn commit_subjects(repo_path: &Path, branch: &str) -> Result<Vec<String>> {
    let output = git(repo_path, &["log", "--format=%s", branch])?;
    Ok(output.lines().map(str::to_string).collect())
}

/// Archives created in the working directory
pub fn archives(repo_path: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(repo_path)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "zip") {
            found.push(path);
        }
    }
    Ok(found)
}
