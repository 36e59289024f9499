//! Original-file archiving.
//!
//! After a successful conversion the source moves into an "Original
//! files" folder next to it. Creation is idempotent. If the folder
//! already holds a same-named file the move is refused - an archived
//! original may be the only remaining copy, so the conflict surfaces
//! as a job failure instead of an overwrite.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::pipeline::{JobError, JobResult};

/// Move a successfully converted source into the archive folder.
///
/// Returns the archived path.
pub fn archive_original(source: &Path, settings: &Settings) -> JobResult<PathBuf> {
    let parent = match source.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let archive_dir = parent.join(&settings.archive.folder_name);
    fs::create_dir_all(&archive_dir).map_err(|e| JobError::io("creating archive folder", e))?;

    let file_name = source.file_name().ok_or_else(|| {
        JobError::io(
            "resolving source file name",
            io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"),
        )
    })?;

    let target = archive_dir.join(file_name);
    if target.exists() {
        return Err(JobError::ArchiveConflict { path: target });
    }

    move_file(source, &target)?;
    tracing::debug!("Archived {} -> {}", source.display(), target.display());
    Ok(target)
}

/// Move camcorder sidecar files (`.MOI`, `.PGI`) from `directory` into
/// its archive folder. Best-effort: conflicts and I/O failures are
/// logged and skipped. Returns the number of files moved.
pub fn archive_sidecars(directory: &Path, settings: &Settings) -> usize {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Cannot read {} for sidecars: {}", directory.display(), e);
            return 0;
        }
    };

    let archive_dir = directory.join(&settings.archive.folder_name);
    let mut moved = 0;

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || !is_sidecar(&path, &settings.conversion.sidecar_extensions) {
            continue;
        }

        let Some(file_name) = path.file_name() else {
            continue;
        };
        let target = archive_dir.join(file_name);
        if target.exists() {
            tracing::warn!("Sidecar already archived, skipping: {}", target.display());
            continue;
        }

        if let Err(e) = fs::create_dir_all(&archive_dir)
            .map_err(|e| JobError::io("creating archive folder", e))
            .and_then(|_| move_file(&path, &target))
        {
            tracing::warn!("Failed to archive sidecar {}: {}", path.display(), e);
            continue;
        }
        moved += 1;
    }

    moved
}

fn is_sidecar(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|s| s.eq_ignore_ascii_case(e)))
}

/// Rename, falling back to copy+remove for cross-filesystem moves.
fn move_file(from: &Path, to: &Path) -> JobResult<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    fs::copy(from, to).map_err(|e| JobError::io("copying into archive", e))?;
    fs::remove_file(from).map_err(|e| JobError::io("removing original after copy", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn touch(path: &Path, contents: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn archives_into_sibling_folder() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("clip1.MOD");
        touch(&source, b"mod-data");

        let archived = archive_original(&source, &Settings::default()).unwrap();

        assert_eq!(archived, dir.path().join("Original files/clip1.MOD"));
        assert!(archived.is_file());
        assert!(!source.exists());
    }

    #[test]
    fn archiving_twice_is_a_conflict() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::default();

        let first = dir.path().join("clip1.MOD");
        touch(&first, b"first");
        archive_original(&first, &settings).unwrap();

        // same name reappears (re-copied from the camcorder)
        let second = dir.path().join("clip1.MOD");
        touch(&second, b"second");
        let err = archive_original(&second, &settings).unwrap_err();

        assert!(matches!(err, JobError::ArchiveConflict { .. }));
        assert!(second.is_file(), "conflicting source must stay put");
        let archived = dir.path().join("Original files/clip1.MOD");
        assert_eq!(fs::read(archived).unwrap(), b"first");
    }

    #[test]
    fn sidecars_follow_their_mod_files() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("MOV001.MOI"), b"moi");
        touch(&dir.path().join("MOV001.PGI"), b"pgi");
        touch(&dir.path().join("notes.txt"), b"keep me");

        let moved = archive_sidecars(dir.path(), &Settings::default());

        assert_eq!(moved, 2);
        assert!(dir.path().join("Original files/MOV001.MOI").is_file());
        assert!(dir.path().join("Original files/MOV001.PGI").is_file());
        assert!(dir.path().join("notes.txt").is_file());
    }

    #[test]
    fn sidecar_conflicts_are_skipped() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("MOV001.MOI"), b"new");
        touch(&dir.path().join("Original files/MOV001.MOI"), b"old");

        let moved = archive_sidecars(dir.path(), &Settings::default());

        assert_eq!(moved, 0);
        assert!(dir.path().join("MOV001.MOI").is_file());
        let archived = dir.path().join("Original files/MOV001.MOI");
        assert_eq!(fs::read(archived).unwrap(), b"old");
    }

    #[test]
    fn no_sidecars_means_no_archive_folder() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("notes.txt"), b"keep me");

        assert_eq!(archive_sidecars(dir.path(), &Settings::default()), 0);
        assert!(!dir.path().join("Original files").exists());
    }
}
