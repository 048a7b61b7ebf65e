//! Exclusion tables shared by the ignore file and the archive builder.
//!
//! The same name and extension tables feed both the generated `.gitignore` section
//! written during initialization and the predicate that keeps build output, caches and
//! editor metadata out of the final archive.

use std::path::{Component, Path};

/// Marker line identifying the section this tool appended to `.gitignore`
pub const GITIGNORE_SENTINEL: &str = "# Auto-generated by codebase switcher";

/// Files never packaged, whatever branch is archived
pub const EXCLUDE_FILES: &[&str] = &["codebase-switcher", "codebase-switcher.exe", ".gitignore"];

/// Build caches, dependency folders and editor metadata, matched by exact name
pub const EXCLUDE_PATTERNS: &[&str] = &[
    ".DS_Store",
    ".Python",
    ".Spotlight-V100",
    ".Trashes",
    ".cache",
    ".eggs",
    ".gradle",
    ".idea",
    ".next",
    ".npm",
    ".nuxt",
    ".pnpm-debug.log",
    ".sublime-project",
    ".sublime-workspace",
    ".temp",
    ".tmp",
    ".venv",
    ".vscode",
    ".vuepress",
    ".yarn",
    "ENV",
    "Thumbs.db",
    "__pycache__",
    "bin",
    "develop-eggs",
    "downloads",
    "eggs",
    "ehthumbs.db",
    "lib64",
    "logs",
    "node_modules",
    "npm-debug.log",
    "obj",
    "parts",
    "sdist",
    "target",
    "var",
    "venv",
    "wheels",
    "yarn-debug.log",
    "yarn-error.log",
];

/// Binary, log, backup and archive extensions
pub const EXCLUDE_EXTENSIONS: &[&str] = &[
    ".pyc", ".pyo", ".class", ".o", ".a", ".lib", ".so", ".dylib", ".dll", ".exe", ".pdb",
    ".log", ".tmp", ".temp", ".swp", ".swo", ".bak", ".backup", ".old", ".orig", ".save",
    ".zip", ".tar", ".tar.gz", ".rar", ".7z", ".bz2", ".xz", ".deb", ".rpm", ".pkg", ".dmg",
    ".msi", ".jar", ".war", ".ear",
];

/// Outcome of merging the switcher section into an ignore file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitignoreMerge {
    /// No ignore file existed; contains the full new content
    Created(String),
    /// An ignore file existed without our section; contains the merged content
    Updated(String),
    /// The section is already present
    Unchanged,
}

/// Expand the exclusion tables into gitignore patterns
pub fn gitignore_patterns() -> Vec<String> {
    let mut patterns = Vec::with_capacity(EXCLUDE_PATTERNS.len() * 2 + EXCLUDE_EXTENSIONS.len());

    for pattern in EXCLUDE_PATTERNS {
        if pattern.starts_with('.') {
            patterns.push(pattern.to_string());
            patterns.push(format!("**/{pattern}"));
        } else {
            patterns.push(format!("{pattern}/"));
            patterns.push(format!("**/{pattern}/"));
        }
    }
    patterns.extend(EXCLUDE_EXTENSIONS.iter().map(|ext| format!("*{ext}")));

    patterns
}

pub fn gitignore_section() -> String {
    format!(
        "{GITIGNORE_SENTINEL}\n# Excludes large files and build artifacts to keep branches clean\n\n{}\n",
        gitignore_patterns().join("\n")
    )
}

pub fn merge_gitignore(existing: Option<&str>) -> GitignoreMerge {
    match existing {
        None => GitignoreMerge::Created(gitignore_section()),
        Some(content) if content.contains(GITIGNORE_SENTINEL) => GitignoreMerge::Unchanged,
        Some(content) => GitignoreMerge::Updated(format!(
            "{}\n\n{}",
            content.trim_end(),
            gitignore_section()
        )),
    }
}

/// Whether a path relative to the project root stays out of the archive
pub fn should_exclude(relative: &Path, archive_name: &str) -> bool {
    let name = match relative.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };

    if name == archive_name || EXCLUDE_FILES.contains(&name) {
        return true;
    }

    let lower = name.to_lowercase();
    if EXCLUDE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return true;
    }

    relative.components().any(|component| match component {
        Component::Normal(part) => part
            .to_str()
            .is_some_and(|part| part == ".git" || EXCLUDE_PATTERNS.contains(&part)),
        _ => false,
    })
}
