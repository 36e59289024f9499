//! Source file discovery.
//!
//! Walks the chosen root recursively and collects every file whose
//! extension matches the source type. Existing archive folders are
//! pruned from the walk, so a tree that already converted scans to
//! zero work on the next run.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::Settings;
use crate::pipeline::{RunError, RunResult};

/// Locate all source files under `root`.
///
/// Order follows filesystem traversal order and is otherwise
/// unspecified. An invalid root is fatal; unreadable entries below it
/// are logged and skipped.
pub fn locate_source_files(root: &Path, settings: &Settings) -> RunResult<Vec<PathBuf>> {
    if !root.exists() {
        return Err(RunError::root_not_found(root));
    }
    if !root.is_dir() {
        return Err(RunError::root_not_a_directory(root));
    }

    let archive_name = settings.archive.folder_name.as_str();
    let extension = settings.conversion.source_extension.as_str();

    let mut sources = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_archive_dir(entry, archive_name));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            sources.push(entry.into_path());
        }
    }

    tracing::debug!(
        "Located {} .{} files under {}",
        sources.len(),
        extension,
        root.display()
    );

    Ok(sources)
}

/// True for directories named like the archive folder, case-insensitive.
fn is_archive_dir(entry: &DirEntry, archive_name: &str) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.eq_ignore_ascii_case(archive_name))
}

/// Case-insensitive extension match.
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}
