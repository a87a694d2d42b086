//! Artifact file writes.

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `contents` to `path` through a sibling temp file and a rename, so
/// readers never observe a partially written artifact.
///
/// Parent directories are created as needed. Re-running with the same
/// contents leaves the same bytes at the same path.
///
/// # Errors
///
/// Returns [`Error::Io`] if a directory cannot be created or the write or
/// rename fails.
///
/// # Examples
///
/// ```
/// use glide_migrate_core::fs::write_atomic;
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("out/commands.json");
/// write_atomic(&path, "{}")?;
/// assert_eq!(std::fs::read_to_string(&path)?, "{}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    write_atomic_all(&[(path, contents)])
}

/// Writes a set of related artifacts, staging every temp file before
/// renaming any of them into place.
///
/// A failure while staging removes the staged temp files and leaves every
/// target untouched.
///
/// # Errors
///
/// Returns [`Error::Io`] if a directory cannot be created or a write or
/// rename fails.
///
/// # Examples
///
/// ```
/// use glide_migrate_core::fs::write_atomic_all;
///
/// let dir = tempfile::tempdir()?;
/// let catalog = dir.path().join("commands.json");
/// let families = dir.path().join("commands-by-family.json");
/// write_atomic_all(&[(catalog.as_path(), "[]"), (families.as_path(), "{}")])?;
/// assert_eq!(std::fs::read_to_string(&families)?, "{}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_atomic_all(files: &[(&Path, &str)]) -> Result<()> {
    let mut staged: Vec<PathBuf> = Vec::with_capacity(files.len());
    for (path, contents) in files {
        if let Err(e) = stage(path, contents) {
            remove_all(&staged);
            return Err(e);
        }
        staged.push(temp_path_for(path));
    }

    for (i, (path, contents)) in files.iter().enumerate() {
        if let Err(e) = fs::rename(&staged[i], path) {
            remove_all(&staged[i..]);
            return Err(Error::io(path, e));
        }
        tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    }
    Ok(())
}

fn stage(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, contents).map_err(|e| Error::io(&temp_path, e))
}

fn remove_all(temp_paths: &[PathBuf]) {
    for temp_path in temp_paths {
        let _ = fs::remove_file(temp_path);
    }
}

/// Reads `path`, returning `None` if it does not exist.
///
/// # Errors
///
/// Returns [`Error::Io`] for any failure other than a missing file.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "artifact".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_temp_names_do_not_collide_across_extensions() {
        let json = temp_path_for(Path::new("/out/glide-validation.json"));
        let md = temp_path_for(Path::new("/out/glide-validation.md"));
        assert_ne!(json, md);
    }

    #[test]
    fn test_read_optional_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_optional(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn test_write_into_missing_directory_fails_when_parent_is_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let err = write_atomic(&blocker.join("nested.json"), "{}").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_write_atomic_all_leaves_targets_untouched_on_staging_failure() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("commands.json");
        fs::write(&catalog, "old").unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let families = blocker.join("families.json");
        let err = write_atomic_all(&[(catalog.as_path(), "new"), (families.as_path(), "{}")])
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));

        assert_eq!(fs::read_to_string(&catalog).unwrap(), "old");
        assert!(!temp_path_for(&catalog).exists());
    }

    #[test]
    fn test_write_atomic_all_writes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("out/report.json");
        let summary = dir.path().join("out/summary.md");

        write_atomic_all(&[(report.as_path(), "{}"), (summary.as_path(), "# ok")]).unwrap();

        assert_eq!(fs::read_to_string(&report).unwrap(), "{}");
        assert_eq!(fs::read_to_string(&summary).unwrap(), "# ok");
    }
}
