//! Compressed snapshot of a working tree.
//!
//! [`ArchiveBuilder`] walks a directory, drops everything the exclusion predicate
//! rejects, and writes the remaining regular files into one deflate-compressed zip
//! with `/`-separated relative paths. A file that cannot be read is skipped with a
//! warning; a failure of the zip writer itself aborts the build and removes the
//! partial artifact.

use crate::core::error::{Result, SwitcherError};
use crate::core::output::{print_step, print_warning};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub files_written: usize,
    pub files_skipped: usize,
    pub size_bytes: u64,
}

pub struct ArchiveBuilder {
    root: PathBuf,
}

impl ArchiveBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ArchiveBuilder { root: root.into() }
    }

    /// Write every non-excluded file under the root into `output`.
    ///
    /// `exclude` receives paths relative to the root, directories included; an
    /// excluded directory is not descended into.
    pub fn build<F>(&self, output: &Path, exclude: F) -> Result<ArchiveSummary>
    where
        F: Fn(&Path) -> bool,
    {
        match self.write_archive(output, &exclude) {
            Ok((files_written, files_skipped)) => {
                let size_bytes = fs::metadata(output)?.len();
                Ok(ArchiveSummary {
                    path: output.to_path_buf(),
                    files_written,
                    files_skipped,
                    size_bytes,
                })
            }
            Err(e) => {
                remove_partial_archive(output);
                Err(SwitcherError::archive_failed(output, e.to_string()))
            }
        }
    }

    fn write_archive(&self, output: &Path, exclude: &dyn Fn(&Path) -> bool) -> Result<(usize, usize)> {
        let file = File::create(output)?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut written = 0;
        let mut skipped = 0;

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry
                        .path()
                        .strip_prefix(&self.root)
                        .is_ok_and(|relative| exclude(relative))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable directory entry: {e}");
                    print_warning(&format!("Skipping unreadable entry: {e}"));
                    skipped += 1;
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };

            let mut source = match File::open(entry.path()) {
                Ok(source) => source,
                Err(e) => {
                    log::warn!("Skipping {}: {e}", relative.display());
                    print_warning(&format!("Skipping {}: {e}", relative.display()));
                    skipped += 1;
                    continue;
                }
            };

            zip.start_file(entry_name(relative), options)?;
            io::copy(&mut source, &mut zip)?;
            written += 1;
        }

        zip.finish()?;
        Ok((written, skipped))
    }
}

/// Zip entry names always use forward slashes
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn remove_partial_archive(output: &Path) {
    if !output.exists() {
        return;
    }

    match fs::remove_file(output) {
        Ok(()) => print_step("Cleaned up incomplete zip file"),
        Err(e) => {
            log::warn!("Could not remove {}: {e}", output.display());
            print_warning("Could not clean up incomplete zip file");
        }
    }
}
